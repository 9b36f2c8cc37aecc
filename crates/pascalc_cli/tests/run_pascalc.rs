use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const PROGRAM: &str = "\
program hitung;
variabel
  x: integer;
  d: larik[1..3] dari real;
mulai
  x := 1;
  d[x] := 2.5
selesai.
";

fn pascalc(args: &[&str], file: &Path) -> eyre::Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_pascalc"))
        .args(args)
        .arg("-qq")
        .arg(file)
        .env_remove("PASCALC_RULES")
        .env("NO_COLOR", "1")
        .output()?)
}

#[test]
fn prints_every_stage_and_writes_output() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("hitung.pas");
    fs::write(&source, PROGRAM)?;
    let out_file = dir.path().join("out.txt");
    let out_arg = out_file.to_string_lossy().to_string();

    let output = pascalc(&["--emit", "all", "-o", &out_arg], &source)?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout)?;

    let headings = [
        "===== TOKENS =====",
        "===== PARSE TREE =====",
        "===== DECORATED AST =====",
        "===== SYMBOL TABLE =====",
    ];
    let positions = headings
        .iter()
        .map(|heading| stdout.find(heading))
        .collect::<Option<Vec<_>>>()
        .expect("every stage is printed");
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(stdout.contains("KEYWORD(program)\nIDENTIFIER(hitung)\n"));
    assert!(stdout.contains("<program>"));
    assert!(stdout.contains("=== ARRAY TABLE (atab) ==="));
    assert_eq!(fs::read_to_string(&out_file)?, stdout);
    Ok(())
}

#[test]
fn token_files_are_accepted() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("hitung.pas");
    fs::write(&source, PROGRAM)?;

    let tokens = pascalc(&["--emit", "tokens"], &source)?;
    assert!(tokens.status.success());
    let dump = String::from_utf8(tokens.stdout)?;
    let dump = dump
        .strip_prefix("===== TOKENS =====\n")
        .expect("only the token stage is printed");
    let token_file = dir.path().join("hitung.txt");
    fs::write(&token_file, dump)?;

    let from_source = pascalc(&["--emit", "ast"], &source)?;
    let from_tokens = pascalc(&["--emit", "ast"], &token_file)?;
    assert!(from_tokens.status.success());
    assert_eq!(from_tokens.stdout, from_source.stdout);
    Ok(())
}

#[test]
fn semantic_errors_fail_after_printing() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("salah.pas");
    fs::write(&source, "program salah; mulai y := 'a' selesai.")?;

    let output = pascalc(&["--emit", "symbols"], &source)?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stdout)?.contains("===== SYMBOL TABLE ====="));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("error: Undeclared variable 'y'"), "{stderr}");
    Ok(())
}

#[test]
fn syntax_errors_stop_compilation() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("rusak.pas");
    fs::write(&source, "program rusak mulai selesai.")?;

    let output = pascalc(&[], &source)?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Syntax error at position 2"), "{stderr}");
    Ok(())
}
