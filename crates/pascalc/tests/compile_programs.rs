use eyre::eyre;
use log::info;
use pascal_ast_parsing::token_file::write_tokens;
use pascal_types::DataType;
use pascalc::error::PascalCErrorKind;
use pascalc::PascalC;
use std::io::Write;
use test_log::test;

const SAMPLE: &str = r#"
program contoh;
konstanta
  batas = 10;
tipe
  deret = larik [1..batas] dari integer;
variabel
  a, b: integer;
  d: deret;

fungsi kuadrat(n: integer): integer;
mulai
  kuadrat := n * n
selesai;

mulai
  a := 0;
  untuk b := 1 ke batas lakukan
    mulai
      d[b] := kuadrat(b);
      a := a + d[b]
    selesai;
  jika a > 100 maka writeln('besar') selain-itu writeln('kecil');
  ulangi a := a - 1 sampai a <= 0
selesai.
"#;

fn write_temp(suffix: &str, bytes: &[u8]) -> eyre::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

#[test]
fn sample_compiles_cleanly() -> eyre::Result<()> {
    let compiler = PascalC::builder().build()?;
    let file = write_temp(".pas", SAMPLE.as_bytes())?;
    let compilation = compiler.compile(file.path())?;
    compilation.check()?;
    let analysis = &compilation.analysis;
    info!("symbol table:\n{}", analysis.symbol_table);
    assert!(analysis.warnings.is_empty());

    let d = analysis
        .symbol_table
        .lookup("d")
        .ok_or_else(|| eyre!("d should be declared"))?
        .1;
    assert_eq!(d.data_type, DataType::Array);
    let array = analysis
        .symbol_table
        .array(d.reference.ok_or_else(|| eyre!("arrays reference atab"))?)
        .ok_or_else(|| eyre!("missing array entry"))?;
    assert_eq!((array.low, array.high, array.size), (1, 10, 10));
    Ok(())
}

#[test]
fn decorated_tree_is_printed() -> eyre::Result<()> {
    let compiler = PascalC::builder().build()?;
    let compilation =
        compiler.compile_source("program p; variabel x: integer; mulai x := 1 selesai.")?;
    let printed = compilation.analysis.program.to_string();
    info!("decorated tree:\n{printed}");
    assert!(printed.contains("ProgramNode(name: 'p') → tab_index:32, type:void, lev:0"));
    assert!(printed.contains("VarDecl('x', type: 'integer') → tab_index:33, type:integer, lev:0"));
    Ok(())
}

#[test]
fn utf16_sources_are_decoded() -> eyre::Result<()> {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(
        "program lebar; mulai writeln('hai') selesai."
            .encode_utf16()
            .flat_map(u16::to_le_bytes),
    );
    let file = write_temp(".pas", &bytes)?;
    let compilation = PascalC::builder().build()?.compile(file.path())?;
    assert_eq!(compilation.analysis.program.name, "lebar");
    compilation.check()?;
    Ok(())
}

#[test]
fn token_files_are_not_lexed() -> eyre::Result<()> {
    let compiler = PascalC::builder().build()?;
    let lexed = compiler.lex(SAMPLE)?;
    let file = write_temp(".txt", write_tokens(&lexed).as_bytes())?;
    let compilation = compiler.compile(file.path())?;
    assert_eq!(compilation.tokens, lexed);
    compilation.check()?;
    Ok(())
}

#[test]
fn syntax_errors_name_the_file() -> eyre::Result<()> {
    let file = write_temp(".pas", b"program p mulai selesai.")?;
    let error = PascalC::builder()
        .build()?
        .compile(file.path())
        .expect_err("missing semicolon");
    assert!(matches!(error.kind(), PascalCErrorKind::Syntax(_)));
    assert_eq!(error.path(), Some(file.path()));
    assert!(error
        .to_string()
        .ends_with("Syntax error at position 2: unexpected token KEYWORD(mulai), expected SEMICOLON(;)"));
    Ok(())
}

#[test]
fn lexical_errors_abort() -> eyre::Result<()> {
    let error = PascalC::builder()
        .build()?
        .compile_source("program p; mulai x := 1 ? selesai.")
        .expect_err("unexpected character");
    assert!(matches!(error.kind(), PascalCErrorKind::Lex(_)));
    Ok(())
}

#[test]
fn semantic_errors_do_not_stop_compilation() -> eyre::Result<()> {
    let compilation = PascalC::builder()
        .build()?
        .compile_source("program p; variabel x: integer; mulai x := 'a'; y := x selesai.")?;
    let error = compilation.check().expect_err("two semantic errors");
    assert_eq!(error.semantic_errors().len(), 2);
    assert_eq!(
        error.to_string(),
        "Type mismatch in assignment: cannot assign char to integer\nUndeclared variable 'y'"
    );
    Ok(())
}
