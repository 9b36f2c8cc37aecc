//! Fills the symbol table, checks types and decorates the abstract syntax tree in one walk

use crate::symbol_table::{SymbolTable, TabEntry};
use pascal_ast::declarations::{
    ArrayType, ConstDecl, ConstValue, DeclarationPart, Param, RangeSpec, Subprogram, TypeDecl,
    TypeSpec, VarDecl,
};
use pascal_ast::decoration::{Decorated, SymbolRef};
use pascal_ast::expr::{ArrayAccess, Expr, FunctionCall, Number, VarRef};
use pascal_ast::program::Program;
use pascal_ast::statements::{
    AssignTarget, Assignment, CompoundStatement, ForStatement, ProcedureCall, Statement,
};
use pascal_ast::typed::{TypeError, TypeState, TypedMut};
use pascal_ast_parsing::parser::syntax_tree::BUILTIN_PROCEDURES;
use pascal_types::{DataType, ObjectKind};
use tracing::{debug, debug_span, info, instrument, trace};

mod error;

pub use error::{SemanticError, SemanticWarning};

/// Array bounds used when a bound isn't an integer literal
const DEFAULT_ARRAY_BOUNDS: (i64, i64) = (1, 10);

/// The outcome of semantic analysis
#[derive(Debug)]
pub struct Analysis {
    /// The program, with every resolvable node decorated
    pub program: Program,
    pub errors: Vec<SemanticError>,
    pub warnings: Vec<SemanticWarning>,
    pub symbol_table: SymbolTable,
}

impl Analysis {
    /// Whether no semantic errors were found
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Analyzes a whole program
pub fn analyze(program: Program) -> Analysis {
    SemanticAnalysisPass::new(program).pass()
}

#[derive(Debug)]
pub struct SemanticAnalysisPass {
    program: Program,
}

impl SemanticAnalysisPass {
    pub fn new(program: Program) -> Self {
        Self { program }
    }

    #[instrument(skip(self), name = "semantic_analysis", fields(program = %self.program.name))]
    pub fn pass(mut self) -> Analysis {
        let mut analyzer = SemanticAnalyzer::default();
        analyzer.program(&mut self.program);
        info!(
            errors = analyzer.errors.len(),
            warnings = analyzer.warnings.len(),
            "semantic analysis finished"
        );
        Analysis {
            program: self.program,
            errors: analyzer.errors,
            warnings: analyzer.warnings,
            symbol_table: analyzer.table,
        }
    }
}

fn bind(node: &mut impl Decorated, index: usize, data_type: DataType, level: usize) {
    let decoration = node.decoration_mut();
    decoration.symbol = Some(SymbolRef::Entry(index));
    decoration.ty = TypeState::Available(data_type);
    decoration.level = Some(level);
}

fn bind_builtin(node: &mut impl Decorated, data_type: Option<DataType>) {
    let decoration = node.decoration_mut();
    decoration.symbol = Some(SymbolRef::Builtin);
    decoration.ty = data_type.map_or(TypeState::Unavailable, TypeState::Available);
    decoration.level = Some(0);
}

fn is_boolean_literal(name: &str) -> bool {
    name.eq_ignore_ascii_case("true") || name.eq_ignore_ascii_case("false")
}

fn is_builtin_procedure(name: &str) -> bool {
    BUILTIN_PROCEDURES
        .iter()
        .any(|builtin| builtin.eq_ignore_ascii_case(name))
}

#[derive(Debug, Default)]
struct SemanticAnalyzer {
    table: SymbolTable,
    errors: Vec<SemanticError>,
    warnings: Vec<SemanticWarning>,
}

impl SemanticAnalyzer {
    fn report(&mut self, error: SemanticError) {
        debug!("semantic error: {error}");
        self.errors.push(error);
    }

    fn warn(&mut self, warning: SemanticWarning) {
        debug!("semantic warning: {warning}");
        self.warnings.push(warning);
    }

    fn lookup(&self, name: &str) -> Option<(usize, TabEntry)> {
        self.table
            .lookup(name)
            .map(|(index, entry)| (index, entry.clone()))
    }

    fn is_duplicate(&self, name: &str) -> bool {
        self.table.lookup_in_current_scope(name).is_some()
    }

    fn program(&mut self, program: &mut Program) {
        let index = self.table.enter_program(&program.name);
        bind(program, index, DataType::Void, 0);
        self.declarations(&mut program.declarations);
        self.compound(&mut program.body);
    }

    fn declarations(&mut self, part: &mut DeclarationPart) {
        for constant in &mut part.constants {
            self.constant(constant);
        }
        for ty in &mut part.types {
            self.type_declaration(ty);
        }
        for variable in &mut part.variables {
            self.variable(variable);
        }
        for subprogram in &mut part.subprograms {
            self.subprogram(subprogram);
        }
    }

    fn constant(&mut self, decl: &mut ConstDecl) {
        if self.is_duplicate(&decl.name) {
            self.report(SemanticError::Duplicate {
                kind: ObjectKind::Constant,
                name: decl.name.clone(),
            });
            return;
        }
        let data_type = match &decl.value {
            ConstValue::Integer(_) => DataType::Integer,
            ConstValue::Real(_) => DataType::Real,
            ConstValue::Text(text) if text.chars().count() == 1 => DataType::Char,
            ConstValue::Text(_) => DataType::String,
            ConstValue::Identifier(name) if is_boolean_literal(name) => DataType::Boolean,
            ConstValue::Identifier(name) => match self.lookup(name) {
                Some((_, entry)) if entry.kind == ObjectKind::Constant => entry.data_type,
                _ => {
                    self.report(SemanticError::UndeclaredConstant(name.clone()));
                    DataType::Integer
                }
            },
        };
        let index = self.table.enter_constant(&decl.name, data_type);
        bind(decl, index, data_type, self.table.level());
    }

    fn type_declaration(&mut self, decl: &mut TypeDecl) {
        if self.is_duplicate(&decl.name) {
            self.report(SemanticError::Duplicate {
                kind: ObjectKind::Type,
                name: decl.name.clone(),
            });
            return;
        }
        let (data_type, reference) = self.resolve_type(&mut decl.ty);
        let index = self.table.enter_type(&decl.name, data_type, reference);
        bind(decl, index, data_type, self.table.level());
    }

    fn variable(&mut self, decl: &mut VarDecl) {
        if self.is_duplicate(&decl.name) {
            self.report(SemanticError::Duplicate {
                kind: ObjectKind::Variable,
                name: decl.name.clone(),
            });
            return;
        }
        let (data_type, reference) = self.resolve_type(&mut decl.ty);
        let index = self.table.enter_variable(&decl.name, data_type, reference);
        bind(decl, index, data_type, self.table.level());
    }

    /// Gets the data type of a written type, and its `atab` entry if it's an array.
    ///
    /// Unknown type names are reported and treated as integer.
    fn resolve_type(&mut self, ty: &mut TypeSpec) -> (DataType, Option<usize>) {
        match ty {
            TypeSpec::Primitive(primitive) => (primitive.data_type(), None),
            TypeSpec::Array(array) => (DataType::Array, Some(self.array_type(array))),
            TypeSpec::Custom(name) => match self.lookup(name) {
                Some((_, entry)) if entry.kind == ObjectKind::Type => {
                    (entry.data_type, entry.reference)
                }
                _ => {
                    self.report(SemanticError::UnknownType(name.clone()));
                    (DataType::Integer, None)
                }
            },
            TypeSpec::Range(range) => {
                self.range(range);
                (DataType::Integer, None)
            }
        }
    }

    fn array_type(&mut self, array: &mut ArrayType) -> usize {
        self.range(&mut array.range);
        let low = array
            .range
            .start
            .as_integer_literal()
            .unwrap_or(DEFAULT_ARRAY_BOUNDS.0);
        let high = array
            .range
            .end
            .as_integer_literal()
            .unwrap_or(DEFAULT_ARRAY_BOUNDS.1);
        let (element_type, element_ref) = self.resolve_type(&mut array.element);
        let element_ref = if element_type == DataType::Array {
            element_ref
        } else {
            None
        };
        let element_size = self.table.type_size(element_type, element_ref);
        if SymbolTable::array_size(element_size, low, high).is_none() {
            self.report(SemanticError::ArrayTooLarge { low, high });
        }
        self.table
            .enter_array(DataType::Integer, element_type, element_ref, low, high)
    }

    fn range(&mut self, range: &mut RangeSpec) {
        let start = self.expression(&mut range.start);
        let end = self.expression(&mut range.end);
        if start != Some(DataType::Integer) || end != Some(DataType::Integer) {
            self.warn(SemanticWarning::RangeBoundsNotInteger);
        }
    }

    fn subprogram(&mut self, subprogram: &mut Subprogram) {
        let kind = if subprogram.is_function() {
            ObjectKind::Function
        } else {
            ObjectKind::Procedure
        };
        if self.is_duplicate(&subprogram.name) {
            self.report(SemanticError::Duplicate {
                kind,
                name: subprogram.name.clone(),
            });
            return;
        }
        let return_type = match &mut subprogram.return_type {
            Some(ty) => self.resolve_type(ty).0,
            None => DataType::Void,
        };
        let level = self.table.level();
        let index = self.table.enter_routine(&subprogram.name, kind, return_type);
        bind(subprogram, index, return_type, level);

        let span = debug_span!("subprogram", name = %subprogram.name, kind = %kind);
        let _entered = span.enter();
        for param in &mut subprogram.params {
            self.parameter(param);
        }
        self.declarations(&mut subprogram.declarations);
        self.compound(&mut subprogram.body);
        self.table.exit_scope();
    }

    fn parameter(&mut self, param: &mut Param) {
        if self.is_duplicate(&param.name) {
            self.report(SemanticError::DuplicateParameter(param.name.clone()));
            return;
        }
        let (data_type, reference) = self.resolve_type(&mut param.ty);
        let index = self.table.enter_parameter(&param.name, data_type, reference);
        bind(param, index, data_type, self.table.level());
    }

    fn compound(&mut self, compound: &mut CompoundStatement) {
        for statement in &mut compound.statements {
            self.statement(statement);
        }
    }

    fn statement(&mut self, statement: &mut Statement) {
        match statement {
            Statement::Compound(compound) => self.compound(compound),
            Statement::Assignment(assignment) => self.assignment(assignment),
            Statement::If(statement) => {
                let condition = self.expression(&mut statement.condition);
                if condition.is_some_and(|ty| ty != DataType::Boolean) {
                    self.report(SemanticError::IfCondition);
                }
                self.statement(&mut statement.then_branch);
                if let Some(else_branch) = &mut statement.else_branch {
                    self.statement(else_branch);
                }
            }
            Statement::While(statement) => {
                let condition = self.expression(&mut statement.condition);
                if condition.is_some_and(|ty| ty != DataType::Boolean) {
                    self.report(SemanticError::WhileCondition);
                }
                self.statement(&mut statement.body);
            }
            Statement::For(statement) => self.for_statement(statement),
            Statement::Repeat(statement) => {
                for inner in &mut statement.body {
                    self.statement(inner);
                }
                let condition = self.expression(&mut statement.condition);
                if condition.is_some_and(|ty| ty != DataType::Boolean) {
                    self.report(SemanticError::RepeatCondition);
                }
            }
            Statement::ProcedureCall(call) => self.procedure_call(call),
            Statement::Empty => {}
        }
    }

    fn assignment(&mut self, assignment: &mut Assignment) {
        let target = match &mut assignment.target {
            AssignTarget::Variable(variable) => {
                let found = self.lookup(&variable.name);
                match found {
                    Some((_, entry)) if entry.kind == ObjectKind::Constant => {
                        self.variable_ref(variable);
                        self.report(SemanticError::AssignToConstant(variable.name.clone()));
                        None
                    }
                    _ => self.variable_ref(variable),
                }
            }
            AssignTarget::Element(access) => self.array_access(access),
        };
        let value = self.expression(&mut assignment.value);
        let (Some(target), Some(value)) = (target, value) else {
            return;
        };
        if !value.is_compatible_with(&target) {
            self.report(SemanticError::AssignmentMismatch { value, target });
        }
        assignment.set_type(target);
    }

    fn for_statement(&mut self, statement: &mut ForStatement) {
        match self.lookup(&statement.variable) {
            None => self.report(SemanticError::UndeclaredLoopVariable(
                statement.variable.clone(),
            )),
            Some((index, entry)) => {
                if entry.data_type != DataType::Integer {
                    self.report(SemanticError::LoopVariableNotInteger(
                        statement.variable.clone(),
                    ));
                }
                bind(statement, index, entry.data_type, entry.level);
            }
        }
        let start = self.expression(&mut statement.start);
        if start.is_some_and(|ty| ty != DataType::Integer) {
            self.report(SemanticError::ForStart);
        }
        let end = self.expression(&mut statement.end);
        if end.is_some_and(|ty| ty != DataType::Integer) {
            self.report(SemanticError::ForEnd);
        }
        self.statement(&mut statement.body);
    }

    fn procedure_call(&mut self, call: &mut ProcedureCall) {
        let Some((index, entry)) = self.lookup(&call.name) else {
            if is_builtin_procedure(&call.name) {
                trace!("calling builtin {}", call.name);
                for arg in &mut call.args {
                    self.expression(arg);
                }
                bind_builtin(call, None);
            } else {
                self.report(SemanticError::UndeclaredProcedure(call.name.clone()));
            }
            return;
        };
        if !entry.kind.is_routine() {
            self.report(SemanticError::NotAProcedure(call.name.clone()));
            return;
        }
        let args = call
            .args
            .iter_mut()
            .map(|arg| self.expression(arg))
            .collect::<Vec<_>>();
        self.check_arguments(&call.name, entry.reference, &args);
        bind(call, index, entry.data_type, entry.level);
    }

    /// Checks argument count, then each resolved argument against its parameter's type
    fn check_arguments(&mut self, name: &str, block: Option<usize>, args: &[Option<DataType>]) {
        let params = block
            .map(|block| {
                self.table
                    .parameters(block)
                    .into_iter()
                    .map(|param| param.data_type)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        if params.len() != args.len() {
            self.report(SemanticError::WrongArgumentCount {
                name: name.to_string(),
                expected: params.len(),
                found: args.len(),
            });
            return;
        }
        for (position, (arg, param)) in args.iter().zip(params).enumerate() {
            if let Some(arg) = arg {
                if !arg.is_compatible_with(&param) {
                    self.report(SemanticError::ArgumentMismatch {
                        name: name.to_string(),
                        position: position + 1,
                        found: *arg,
                        expected: param,
                    });
                }
            }
        }
    }

    /// Computes and records the type of an expression. `None` when it couldn't be typed, in which
    /// case the problem has already been reported.
    fn expression(&mut self, expr: &mut Expr) -> Option<DataType> {
        let level = self.table.level();
        match expr {
            Expr::Binary(binary) => {
                let left = self.expression(&mut binary.left);
                let right = self.expression(&mut binary.right);
                let (Some(left), Some(right)) = (left, right) else {
                    binary.set_err(TypeError::Unresolved);
                    return None;
                };
                match binary.op.result_type(left, right) {
                    Ok(ty) => {
                        binary.set_type(ty);
                        binary.decoration.level = Some(level);
                        Some(ty)
                    }
                    Err(e) => {
                        self.report(e.into());
                        binary.set_err(TypeError::Unresolved);
                        None
                    }
                }
            }
            Expr::Unary(unary) => {
                let Some(operand) = self.expression(&mut unary.operand) else {
                    unary.set_err(TypeError::Unresolved);
                    return None;
                };
                match unary.op.result_type(operand) {
                    Ok(ty) => {
                        unary.set_type(ty);
                        unary.decoration.level = Some(level);
                        Some(ty)
                    }
                    Err(e) => {
                        self.report(e.into());
                        unary.set_err(TypeError::Unresolved);
                        None
                    }
                }
            }
            Expr::Variable(variable) => self.variable_ref(variable),
            Expr::Index(access) => self.array_access(access),
            Expr::Call(call) => self.function_call(call),
            Expr::Number(number) => {
                let ty = match number.value {
                    Number::Integer(_) => DataType::Integer,
                    Number::Real(_) => DataType::Real,
                };
                number.set_type(ty);
                number.decoration.level = Some(level);
                Some(ty)
            }
            Expr::Char(literal) => {
                literal.set_type(DataType::Char);
                literal.decoration.level = Some(level);
                Some(DataType::Char)
            }
            Expr::String(literal) => {
                literal.set_type(DataType::String);
                literal.decoration.level = Some(level);
                Some(DataType::String)
            }
        }
    }

    fn variable_ref(&mut self, variable: &mut VarRef) -> Option<DataType> {
        if is_boolean_literal(&variable.name) {
            bind_builtin(variable, Some(DataType::Boolean));
            return Some(DataType::Boolean);
        }
        let Some((index, entry)) = self.lookup(&variable.name) else {
            self.report(SemanticError::UndeclaredVariable(variable.name.clone()));
            variable.set_err(TypeError::IdentifierNotResolved(variable.name.clone()));
            return None;
        };
        if !entry.kind.is_value() {
            self.report(SemanticError::NotAVariable(variable.name.clone()));
            variable.set_err(TypeError::Unresolved);
            return None;
        }
        bind(variable, index, entry.data_type, entry.level);
        Some(entry.data_type)
    }

    fn array_access(&mut self, access: &mut ArrayAccess) -> Option<DataType> {
        let Some((index, entry)) = self.lookup(&access.array) else {
            self.report(SemanticError::UndeclaredArray(access.array.clone()));
            access.set_err(TypeError::IdentifierNotResolved(access.array.clone()));
            return None;
        };
        if entry.data_type != DataType::Array {
            self.report(SemanticError::NotAnArray(access.array.clone()));
            access.set_err(TypeError::Unresolved);
            return None;
        }
        let subscript = self.expression(&mut access.index);
        if subscript.is_some_and(|ty| ty != DataType::Integer) {
            self.report(SemanticError::ArrayIndexNotInteger);
        }
        let element = entry
            .reference
            .and_then(|reference| self.table.array(reference))
            .map_or(DataType::Integer, |array| array.element_type);
        bind(access, index, element, entry.level);
        Some(element)
    }

    fn function_call(&mut self, call: &mut FunctionCall) -> Option<DataType> {
        let Some((index, entry)) = self.lookup(&call.name) else {
            self.report(SemanticError::UndeclaredFunction(call.name.clone()));
            call.set_err(TypeError::IdentifierNotResolved(call.name.clone()));
            return None;
        };
        if entry.kind != ObjectKind::Function {
            self.report(SemanticError::NotAFunction(call.name.clone()));
            call.set_err(TypeError::Unresolved);
            return None;
        }
        let args = call
            .args
            .iter_mut()
            .map(|arg| self.expression(arg))
            .collect::<Vec<_>>();
        self.check_arguments(&call.name, entry.reference, &args);
        bind(call, index, entry.data_type, entry.level);
        Some(entry.data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pascal_ast::decoration::Decoration;
    use pascal_ast_parsing::lexer::{tokenize, RuleSet};
    use pascal_ast_parsing::parser::parse;
    use pascal_ast_parsing::parser::transforms::to_ast;
    use test_log::test;

    fn analyze_source(source: &str) -> Analysis {
        let rules = RuleSet::builtin().expect("builtin rules");
        let tokens = tokenize(source, &rules).expect("could not lex");
        let tree = parse(&tokens).expect("could not parse");
        analyze(to_ast(&tree).expect("could not build ast"))
    }

    fn messages(analysis: &Analysis) -> Vec<String> {
        analysis.errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn program_entry_follows_reserved_words() {
        let analysis = analyze_source("program p; mulai selesai.");
        assert!(analysis.is_ok());
        assert_eq!(analysis.program.decoration.entry(), Some(32));
        let entry = analysis.symbol_table.entry(32).unwrap();
        assert_eq!(entry.name, "p");
        assert_eq!(entry.kind, ObjectKind::Program);
    }

    #[test]
    fn constants_are_typed_by_value() {
        let analysis = analyze_source(
            "program p; konstanta a = 1; b = 2.5; c = 'x'; d = 'xy'; e = a; f = true; \
             mulai selesai.",
        );
        assert!(analysis.is_ok(), "{:?}", analysis.errors);
        let types = analysis
            .program
            .declarations
            .constants
            .iter()
            .map(|c| c.decoration.data_type())
            .collect::<Vec<_>>();
        assert_eq!(
            types,
            [
                Some(DataType::Integer),
                Some(DataType::Real),
                Some(DataType::Char),
                Some(DataType::String),
                Some(DataType::Integer),
                Some(DataType::Boolean)
            ]
        );
    }

    #[test]
    fn unknown_constant_reference() {
        let analysis = analyze_source("program p; konstanta a = b; mulai selesai.");
        assert_eq!(messages(&analysis), ["Undeclared constant 'b'"]);
    }

    #[test]
    fn arrays_get_an_array_entry() {
        let analysis = analyze_source(
            "program p; variabel a: larik[1..5] dari real; b: larik[n..m] dari char; \
             mulai a[1] := 2.0 selesai.",
        );
        let table = &analysis.symbol_table;
        assert_eq!(table.atab().len(), 2);
        assert_eq!(table.atab()[0].size, 10);
        assert_eq!((table.atab()[1].low, table.atab()[1].high), DEFAULT_ARRAY_BOUNDS);
        assert_eq!(
            messages(&analysis),
            ["Undeclared variable 'n'", "Undeclared variable 'm'"]
        );
        assert_eq!(analysis.warnings, [SemanticWarning::RangeBoundsNotInteger]);
    }

    #[test]
    fn custom_types_inherit_array_ness() {
        let analysis = analyze_source(
            "program p; tipe vektor = larik[0..2] dari integer; variabel v: vektor; w: matriks; \
             mulai v[0] := 1 selesai.",
        );
        assert_eq!(messages(&analysis), ["Unknown type 'matriks'"]);
        let v = &analysis.program.declarations.variables[0];
        assert_eq!(v.decoration.data_type(), Some(DataType::Array));
        let entry = analysis.symbol_table.entry(v.decoration.entry().unwrap()).unwrap();
        assert_eq!(entry.reference, Some(0));
        let w = &analysis.program.declarations.variables[1];
        assert_eq!(w.decoration.data_type(), Some(DataType::Integer));
    }

    #[test]
    fn operator_errors_leave_the_expression_untyped() {
        let analysis = analyze_source(
            "program p; variabel b: boolean; x: integer; mulai x := b + 1; selesai.",
        );
        assert_eq!(messages(&analysis), ["Invalid operand types for '+'"]);
    }

    #[test]
    fn conditions_must_be_boolean() {
        let analysis = analyze_source(
            "program p; variabel x: integer; \
             mulai jika x maka x := 1; selama x lakukan x := 1; ulangi x := 1 sampai x selesai.",
        );
        assert_eq!(
            messages(&analysis),
            [
                "If condition must be a boolean expression",
                "While condition must be a boolean expression",
                "Repeat-until condition must be a boolean expression"
            ]
        );
    }

    #[test]
    fn for_loops() {
        let analysis = analyze_source(
            "program p; variabel r: real; \
             mulai untuk i := 1 ke 2 lakukan writeln(i); untuk r := 'a' ke 2.0 lakukan writeln() selesai.",
        );
        assert_eq!(
            messages(&analysis),
            [
                "Undeclared loop variable 'i'",
                "Undeclared variable 'i'",
                "Loop variable 'r' must be integer",
                "For loop start value must be integer",
                "For loop end value must be integer"
            ]
        );
    }

    #[test]
    fn builtin_procedures_are_predefined() {
        let analysis =
            analyze_source("program p; mulai WriteLn('hai', 1); readln(); selesai.");
        assert!(analysis.is_ok(), "{:?}", analysis.errors);
        let Statement::ProcedureCall(call) = &analysis.program.body.statements[0] else {
            panic!("expected a procedure call");
        };
        assert_eq!(call.decoration.symbol, Some(SymbolRef::Builtin));
        assert_eq!(call.decoration.level, Some(0));
        assert_eq!(call.args[0].decoration().data_type(), Some(DataType::String));
    }

    #[test]
    fn calls_check_their_arguments() {
        let analysis = analyze_source(
            "program p; variabel r: real; \
             fungsi f(a: integer; b: boolean): real; mulai f := a selesai; \
             prosedur q; mulai selesai; \
             mulai r := f(1); r := f(1, 2); q(3); r := q; f(1, true); selesai.",
        );
        assert_eq!(
            messages(&analysis),
            [
                "Wrong number of arguments for 'f': expected 2, got 1",
                "Argument 2 of 'f': cannot pass integer as boolean",
                "Wrong number of arguments for 'q': expected 0, got 1",
                "'q' is not a variable"
            ]
        );
    }

    #[test]
    fn calling_things_that_are_not_routines() {
        let analysis = analyze_source(
            "program p; variabel x: integer; mulai x(1); x := x(1); g(); x := h(2) selesai.",
        );
        assert_eq!(
            messages(&analysis),
            [
                "'x' is not a procedure",
                "'x' is not a function",
                "Undeclared procedure 'g'",
                "Undeclared function 'h'"
            ]
        );
    }

    #[test]
    fn assigning_to_a_constant() {
        let analysis = analyze_source("program p; konstanta n = 3; mulai n := 4 selesai.");
        assert_eq!(messages(&analysis), ["Cannot assign to constant 'n'"]);
    }

    #[test]
    fn array_access_checks() {
        let analysis = analyze_source(
            "program p; variabel a: larik[1..3] dari char; x: integer; \
             mulai a['z'] := 'c'; x := x[1]; x := b[1]; x := a[1] selesai.",
        );
        assert_eq!(
            messages(&analysis),
            [
                "Array index must be integer",
                "'x' is not an array",
                "Undeclared array 'b'",
                "Type mismatch in assignment: cannot assign char to integer"
            ]
        );
    }

    #[test]
    fn routine_declarations_use_the_enclosing_level() {
        let analysis = analyze_source(
            "program p; prosedur q(a: integer); variabel t: integer; mulai t := a selesai; \
             mulai q(1) selesai.",
        );
        assert!(analysis.is_ok(), "{:?}", analysis.errors);
        let q = &analysis.program.declarations.subprograms[0];
        assert_eq!(q.decoration.level, Some(0));
        assert_eq!(q.params[0].decoration.level, Some(1));
        assert_eq!(q.declarations.variables[0].decoration.level, Some(1));
        let param = analysis.symbol_table.entry(q.params[0].decoration.entry().unwrap()).unwrap();
        assert_eq!(param.kind, ObjectKind::Parameter);
        assert_eq!(analysis.symbol_table.level(), 0);
    }

    #[test]
    fn duplicate_parameters_and_routines() {
        let analysis = analyze_source(
            "program p; prosedur q(a, a: integer); mulai selesai; \
             fungsi q: integer; mulai x := 1 selesai; mulai selesai.",
        );
        assert_eq!(
            messages(&analysis),
            ["Duplicate parameter 'a'", "Duplicate declaration of function 'q'"],
            "the duplicate function's body is never analyzed"
        );
    }

    #[test]
    fn unresolved_nodes_are_marked() {
        let analysis = analyze_source("program p; variabel x: integer; mulai x := y + 1 selesai.");
        let Statement::Assignment(assignment) = &analysis.program.body.statements[0] else {
            panic!("expected an assignment");
        };
        let Expr::Binary(binary) = &assignment.value else {
            panic!("expected a binary expression");
        };
        assert_eq!(binary.decoration.ty, TypeState::Err(TypeError::Unresolved));
        assert_eq!(
            binary.left.decoration().ty,
            TypeState::Err(TypeError::IdentifierNotResolved("y".to_string()))
        );
        assert_eq!(assignment.decoration, Decoration::default());
    }
}
