use pascal_ast::expr::Expr;
use pascal_ast::statements::{AssignTarget, Statement};
use pascal_types::{DataType, ObjectKind};
use pascalc::passes::semantic_analysis::Analysis;
use pascalc::PascalC;
use test_log::test;

fn analyze(source: &str) -> Analysis {
    PascalC::builder()
        .build()
        .expect("builtin rules")
        .compile_source(source)
        .unwrap_or_else(|e| panic!("could not compile: {e}"))
        .analysis
}

fn messages(analysis: &Analysis) -> Vec<String> {
    analysis.errors.iter().map(|e| e.to_string()).collect()
}

/// The table index the first statement of a block's body assigns to
fn assigned_entry(statements: &[Statement]) -> Option<usize> {
    match statements.first()? {
        Statement::Assignment(assignment) => match &assignment.target {
            AssignTarget::Variable(variable) => variable.decoration.entry(),
            AssignTarget::Element(access) => access.decoration.entry(),
        },
        _ => None,
    }
}

#[test]
fn locals_leak_to_later_siblings() {
    let analysis = analyze(
        r#"
program lingkup;
prosedur pertama;
mulai
  lokal := 1
selesai;
prosedur kedua;
variabel lokal: integer;
mulai
  lokal := 2
selesai;
prosedur ketiga;
mulai
  lokal := 3
selesai;
mulai
  lokal := 4
selesai.
"#,
    );
    assert_eq!(
        messages(&analysis),
        ["Undeclared variable 'lokal'", "Undeclared variable 'lokal'"],
        "undeclared in the earlier sibling and in the program body"
    );
    let subprograms = &analysis.program.declarations.subprograms;
    let declared = subprograms[1].declarations.variables[0]
        .decoration
        .entry()
        .expect("lokal is declared in kedua");
    assert_eq!(assigned_entry(&subprograms[1].body.statements), Some(declared));
    assert_eq!(
        assigned_entry(&subprograms[2].body.statements),
        Some(declared),
        "a closed block's locals still resolve at the same level"
    );
    assert_eq!(assigned_entry(&subprograms[0].body.statements), None);
}

#[test]
fn char_to_integer_is_a_single_error() {
    let analysis = analyze("program p; variabel x: integer; mulai x := 'a'; selesai.");
    assert_eq!(
        messages(&analysis),
        ["Type mismatch in assignment: cannot assign char to integer"]
    );
}

#[test]
fn duplicate_variables_are_dropped() {
    let analysis = analyze("program p; variabel x: integer; x: real; mulai selesai.");
    assert_eq!(messages(&analysis), ["Duplicate declaration of variable 'x'"]);
    let xs = analysis
        .symbol_table
        .tab()
        .iter()
        .filter(|entry| entry.name == "x")
        .collect::<Vec<_>>();
    assert_eq!(xs.len(), 1);
    assert_eq!(xs[0].data_type, DataType::Integer);
    assert_eq!(analysis.symbol_table.btab()[0].var_size, 1);
}

#[test]
fn oversized_arrays_are_reported() {
    let analysis = analyze(
        r#"
program besar;
variabel
  a: larik[0..9223372036854775807] dari integer;
  b: larik[1..4611686018427387904] dari string;
  c: integer;
mulai
  c := 1
selesai.
"#,
    );
    assert_eq!(
        messages(&analysis),
        [
            "Array bounds 0..9223372036854775807 are too large",
            "Array bounds 1..4611686018427387904 are too large",
        ]
    );
    assert!(analysis.warnings.is_empty());
    let table = &analysis.symbol_table;
    assert_eq!(table.atab().len(), 2);
    assert!(table.atab().iter().all(|array| array.size == usize::MAX));
    let (_, c) = table.lookup("c").expect("c is declared");
    assert_eq!(c.address, usize::MAX);
    assert_eq!(table.btab()[0].var_size, usize::MAX);
}

#[test]
fn grouped_variables_share_a_type() {
    let analysis = analyze("program p; variabel x, y: integer; mulai x := y selesai.");
    assert!(analysis.is_ok());
    let variables = &analysis.program.declarations.variables;
    assert_eq!(variables.len(), 2);
    assert!(variables
        .iter()
        .all(|v| v.decoration.data_type() == Some(DataType::Integer)));
}

#[test]
fn parameters_shadow_globals() {
    let analysis = analyze(
        "program p; variabel n: boolean; \
         prosedur cetak(n: integer); mulai n := n + 1 selesai; \
         mulai cetak(2); n := benar selesai.",
    );
    assert_eq!(messages(&analysis), ["Undeclared variable 'benar'"]);
    let procedure = &analysis.program.declarations.subprograms[0];
    let parameter = procedure.params[0].decoration.entry();
    assert_eq!(assigned_entry(&procedure.body.statements), parameter);
}

#[test]
fn recursive_functions() {
    let analysis = analyze(
        r#"
program rekursi;
variabel hasil: integer;
fungsi fakt(n: integer): integer;
mulai
  jika n <= 1 maka fakt := 1 selain-itu fakt := n * fakt(n - 1)
selesai;
mulai
  hasil := fakt(5)
selesai.
"#,
    );
    assert!(analysis.is_ok(), "{:?}", analysis.errors);
    let fakt = analysis
        .symbol_table
        .lookup("fakt")
        .expect("fakt is declared")
        .1;
    assert_eq!(fakt.kind, ObjectKind::Function);
    assert_eq!(fakt.data_type, DataType::Integer);
    let block = fakt.reference.expect("routines own a block");
    assert_eq!(analysis.symbol_table.btab()[block].param_size, 1);

    let Statement::Assignment(assignment) = &analysis.program.body.statements[0] else {
        panic!("expected an assignment");
    };
    let Expr::Call(call) = &assignment.value else {
        panic!("expected a call");
    };
    assert_eq!(call.decoration.data_type(), Some(DataType::Integer));
    assert_eq!(call.decoration.level, Some(0));
}

#[test]
fn nested_routines_nest_levels() {
    let analysis = analyze(
        r#"
program p;
prosedur luar;
variabel a: integer;
  prosedur dalam;
  variabel b: integer;
  mulai
    b := a
  selesai;
mulai
  dalam()
selesai;
mulai
  luar()
selesai.
"#,
    );
    assert!(analysis.is_ok(), "{:?}", analysis.errors);
    let luar = &analysis.program.declarations.subprograms[0];
    let dalam = &luar.declarations.subprograms[0];
    assert_eq!(luar.decoration.level, Some(0));
    assert_eq!(dalam.decoration.level, Some(1));
    assert_eq!(dalam.declarations.variables[0].decoration.level, Some(2));
}
