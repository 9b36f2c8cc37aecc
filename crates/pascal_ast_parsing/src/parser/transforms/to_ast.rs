use crate::parser::syntax_tree as pt;
use log::trace;
use pascal_ast::declarations::{
    ArrayType, ConstDecl, ConstValue, DeclarationPart, Param, PrimitiveType, RangeSpec, Subprogram,
    TypeDecl, TypeSpec, VarDecl,
};
use pascal_ast::expr::{
    ArrayAccess, CharLiteral, Expr, FunctionCall, Number, NumberLiteral, StringLiteral, VarRef,
};
use pascal_ast::program::Program;
use pascal_ast::statements::{
    AssignTarget, Assignment, CompoundStatement, ForDirection, ForStatement, IfStatement,
    ProcedureCall, RepeatStatement, Statement, WhileStatement,
};
use pascal_ast::token::{Token, TokenKind};
use pascal_types::{BinaryOp, UnaryOp};
use std::str::FromStr;

/// An error converting the parse tree into the AST
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AstBuildError {
    #[error("invalid number literal {text:?} at token {position}")]
    InvalidNumber { text: String, position: usize },
    #[error("invalid {kind} {text} at token {position}")]
    InvalidLiteral {
        kind: TokenKind,
        text: String,
        position: usize,
    },
    #[error("unknown operator {text:?} at token {position}")]
    UnknownOperator { text: String, position: usize },
}

type Result<T> = std::result::Result<T, AstBuildError>;

/// Runs the conversion to the AST, dropping punctuation, keywords and empty statements
pub fn to_ast(program: &pt::Program) -> Result<Program> {
    let name = program.header.name.name().to_string();
    let declarations = declaration_part(&program.declarations)?;
    let body = compound_statement(&program.body)?;
    trace!("built ast for program {name}");
    Ok(Program::new(name, declarations, body))
}

fn declaration_part(part: &pt::DeclarationPart) -> Result<DeclarationPart> {
    let mut declarations = DeclarationPart::default();
    for definition in part.constants.iter().flat_map(|c| &c.definitions) {
        declarations.constants.push(ConstDecl {
            name: definition.name.name().to_string(),
            value: const_value(&definition.value)?,
            decoration: Default::default(),
        });
    }
    for definition in part.types.iter().flat_map(|t| &t.definitions) {
        declarations.types.push(TypeDecl {
            name: definition.name.name().to_string(),
            ty: type_spec(&definition.ty)?,
            decoration: Default::default(),
        });
    }
    for group in part.variables.iter().flat_map(|v| &v.groups) {
        let ty = type_spec(&group.ty)?;
        declarations
            .variables
            .extend(group.names.names().map(|name| VarDecl {
                name: name.to_string(),
                ty: ty.clone(),
                decoration: Default::default(),
            }));
    }
    for subprogram in &part.subprograms {
        declarations.subprograms.push(subprogram_decl(subprogram)?);
    }
    Ok(declarations)
}

fn const_value(token: &Token) -> Result<ConstValue> {
    match token.kind() {
        TokenKind::Number => Ok(match number(token)? {
            Number::Integer(i) => ConstValue::Integer(i),
            Number::Real(r) => ConstValue::Real(r),
        }),
        TokenKind::CharLiteral | TokenKind::StringLiteral => {
            Ok(ConstValue::Text(unquote(token)?))
        }
        _ => Ok(ConstValue::Identifier(token.text().to_string())),
    }
}

fn type_spec(ty: &pt::Type) -> Result<TypeSpec> {
    Ok(match ty {
        pt::Type::Array(array) => TypeSpec::Array(ArrayType {
            range: range(&array.range)?,
            element: Box::new(type_spec(&array.element)?),
        }),
        pt::Type::Primitive(token) => match PrimitiveType::from_str(token.text()) {
            Ok(primitive) => TypeSpec::Primitive(primitive),
            Err(_) => TypeSpec::Custom(token.text().to_string()),
        },
        pt::Type::Named(name) => TypeSpec::Custom(name.name().to_string()),
        pt::Type::Range(r) => TypeSpec::Range(range(r)?),
    })
}

fn range(range: &pt::Range) -> Result<RangeSpec> {
    Ok(RangeSpec {
        start: expression(&range.start)?,
        end: expression(&range.end)?,
    })
}

fn subprogram_decl(subprogram: &pt::SubprogramDeclaration) -> Result<Subprogram> {
    let (name, parameters, return_type, block) = match subprogram {
        pt::SubprogramDeclaration::Procedure(p) => (&p.name, &p.parameters, None, &p.block),
        pt::SubprogramDeclaration::Function(f) => (
            &f.name,
            &f.parameters,
            Some(type_spec(&f.return_type)?),
            &f.block,
        ),
    };
    let mut params = vec![];
    if let Some(parameters) = parameters {
        for group in parameters.groups.items() {
            let ty = type_spec(&group.ty)?;
            params.extend(group.names.names().map(|name| Param {
                name: name.to_string(),
                ty: ty.clone(),
                decoration: Default::default(),
            }));
        }
    }
    Ok(Subprogram {
        name: name.name().to_string(),
        params,
        return_type,
        declarations: declaration_part(&block.declarations)?,
        body: compound_statement(&block.body)?,
        decoration: Default::default(),
    })
}

fn compound_statement(compound: &pt::CompoundStatement) -> Result<CompoundStatement> {
    Ok(CompoundStatement::new(statement_list(&compound.statements)?))
}

fn statement_list(list: &pt::StatementList) -> Result<Vec<Statement>> {
    list.statements()
        .filter(|s| !matches!(s, pt::Statement::Empty))
        .map(statement)
        .collect()
}

fn statement(statement: &pt::Statement) -> Result<Statement> {
    Ok(match statement {
        pt::Statement::Compound(compound) => Statement::Compound(compound_statement(compound)?),
        pt::Statement::Assignment(assignment) => {
            let name = assignment.target.name().to_string();
            let target = match &assignment.index {
                Some(subscript) => AssignTarget::Element(ArrayAccess {
                    array: name,
                    index: Box::new(expression(&subscript.index)?),
                    decoration: Default::default(),
                }),
                None => AssignTarget::Variable(VarRef::new(name)),
            };
            Statement::Assignment(Assignment {
                target,
                value: expression(&assignment.value)?,
                decoration: Default::default(),
            })
        }
        pt::Statement::If(if_statement) => Statement::If(IfStatement {
            condition: expression(&if_statement.condition)?,
            then_branch: Box::new(self::statement(&if_statement.then_branch)?),
            else_branch: match &if_statement.else_branch {
                Some((_, else_branch)) => Some(Box::new(self::statement(else_branch)?)),
                None => None,
            },
            decoration: Default::default(),
        }),
        pt::Statement::While(while_statement) => Statement::While(WhileStatement {
            condition: expression(&while_statement.condition)?,
            body: Box::new(self::statement(&while_statement.body)?),
            decoration: Default::default(),
        }),
        pt::Statement::For(for_statement) => Statement::For(ForStatement {
            variable: for_statement.variable.name().to_string(),
            start: expression(&for_statement.start)?,
            end: expression(&for_statement.end)?,
            direction: if for_statement.is_downto() {
                ForDirection::DownTo
            } else {
                ForDirection::To
            },
            body: Box::new(self::statement(&for_statement.body)?),
            decoration: Default::default(),
        }),
        pt::Statement::Repeat(repeat) => Statement::Repeat(RepeatStatement {
            body: statement_list(&repeat.body)?,
            condition: expression(&repeat.condition)?,
            decoration: Default::default(),
        }),
        pt::Statement::Call(call) => Statement::ProcedureCall(ProcedureCall {
            name: call.name.text().to_string(),
            args: arguments(call.arguments.as_ref())?,
            decoration: Default::default(),
        }),
        pt::Statement::Empty => Statement::Empty,
    })
}

fn arguments(arguments: Option<&pt::ParameterList>) -> Result<Vec<Expr>> {
    arguments
        .into_iter()
        .flat_map(pt::ParameterList::arguments)
        .map(expression)
        .collect()
}

fn expression(expr: &pt::Expression) -> Result<Expr> {
    let left = simple_expression(&expr.left)?;
    match &expr.comparison {
        Some((op, right)) => Ok(Expr::binary(
            binary_op(op)?,
            left,
            simple_expression(right)?,
        )),
        None => Ok(left),
    }
}

fn simple_expression(expr: &pt::SimpleExpression) -> Result<Expr> {
    let mut result = term(&expr.first)?;
    if let Some(sign) = &expr.sign {
        result = Expr::unary(unary_op(sign)?, result);
    }
    for (op, right) in &expr.rest {
        result = Expr::binary(binary_op(op)?, result, term(right)?);
    }
    Ok(result)
}

fn term(term: &pt::Term) -> Result<Expr> {
    let mut result = factor(&term.first)?;
    for (op, right) in &term.rest {
        result = Expr::binary(binary_op(op)?, result, factor(right)?);
    }
    Ok(result)
}

fn factor(node: &pt::Factor) -> Result<Expr> {
    Ok(match node {
        pt::Factor::Variable(name) => Expr::variable(name.name()),
        pt::Factor::Call(call) => Expr::Call(FunctionCall {
            name: call.name.name().to_string(),
            args: arguments(call.arguments.as_ref())?,
            decoration: Default::default(),
        }),
        pt::Factor::Index { name, subscript } => Expr::Index(ArrayAccess {
            array: name.name().to_string(),
            index: Box::new(expression(&subscript.index)?),
            decoration: Default::default(),
        }),
        pt::Factor::Number(token) => Expr::Number(NumberLiteral::new(number(token)?)),
        pt::Factor::Char(token) => {
            let text = unquote(token)?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(value), None) => Expr::Char(CharLiteral {
                    value,
                    decoration: Default::default(),
                }),
                _ => return Err(invalid_literal(token)),
            }
        }
        pt::Factor::String(token) => Expr::String(StringLiteral {
            value: unquote(token)?,
            decoration: Default::default(),
        }),
        pt::Factor::Parenthesized { expression: e, .. } => expression(e)?,
        pt::Factor::Not { tidak, factor: operand } => {
            Expr::unary(unary_op(&tidak.token)?, factor(operand)?)
        }
    })
}

/// Integer, or real when the text has a decimal point or an exponent
fn number(token: &Token) -> Result<Number> {
    let text = token.text();
    let invalid = || AstBuildError::InvalidNumber {
        text: text.to_string(),
        position: token.position(),
    };
    if text.contains(['.', 'e', 'E']) {
        text.parse().map(Number::Real).map_err(|_| invalid())
    } else {
        text.parse().map(Number::Integer).map_err(|_| invalid())
    }
}

/// Strips the surrounding quotes and collapses doubled quotes
fn unquote(token: &Token) -> Result<String> {
    token
        .text()
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .map(|inner| inner.replace("''", "'"))
        .ok_or_else(|| invalid_literal(token))
}

fn invalid_literal(token: &Token) -> AstBuildError {
    AstBuildError::InvalidLiteral {
        kind: token.kind(),
        text: token.text().to_string(),
        position: token.position(),
    }
}

fn binary_op(token: &Token) -> Result<BinaryOp> {
    BinaryOp::from_str(token.text()).map_err(|_| AstBuildError::UnknownOperator {
        text: token.text().to_string(),
        position: token.position(),
    })
}

fn unary_op(token: &Token) -> Result<UnaryOp> {
    UnaryOp::from_str(token.text()).map_err(|_| AstBuildError::UnknownOperator {
        text: token.text().to_string(),
        position: token.position(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, RuleSet};
    use crate::parser::parse;
    use test_log::test;

    fn build(source: &str) -> Program {
        let rules = RuleSet::builtin().unwrap();
        let tokens = tokenize(source, &rules).unwrap();
        to_ast(&parse(&tokens).unwrap()).unwrap()
    }

    fn assigned(program: &Program, index: usize) -> &Expr {
        match &program.body.statements[index] {
            Statement::Assignment(assignment) => &assignment.value,
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn numbers_by_shape() {
        let program = build("program p; mulai x := 12; x := 1.5; x := 2e3 selesai.");
        assert_eq!(assigned(&program, 0), &Expr::integer(12));
        assert_eq!(assigned(&program, 1), &Expr::real(1.5));
        assert_eq!(assigned(&program, 2), &Expr::real(2000.0));
    }

    #[test]
    fn literals_are_unquoted() {
        let program = build("program p; mulai c := 'a'; s := 'it''s'; q := '''' selesai.");
        assert!(matches!(assigned(&program, 0), Expr::Char(CharLiteral { value: 'a', .. })));
        assert!(matches!(assigned(&program, 1), Expr::String(StringLiteral { value, .. }) if value == "it's"));
        assert!(matches!(assigned(&program, 2), Expr::String(StringLiteral { value, .. }) if value == "'"));
    }

    #[test]
    fn sign_becomes_unary() {
        let program = build("program p; mulai x := -a + b selesai.");
        assert_eq!(assigned(&program, 0).to_string(), "((- a) + b)");
    }

    #[test]
    fn empty_statements_dropped() {
        let program = build("program p; mulai ; x := 1; ; selesai.");
        assert_eq!(program.body.statements.len(), 1);
    }

    #[test]
    fn groups_are_unrolled() {
        let program = build(
            "program p; variabel a, b: integer; c: real; \
             prosedur q(x, y: integer; z: char); mulai selesai; mulai selesai.",
        );
        let names: Vec<_> = program.declarations.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(program.declarations.variables[1].ty, TypeSpec::Primitive(PrimitiveType::Integer));
        let params: Vec<_> = program.declarations.subprograms[0]
            .params
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(params, ["x", "y", "z"]);
    }

    #[test]
    fn constant_values() {
        let program = build("program p; konstanta n = 10; s = 'hey'; m = n; mulai selesai.");
        let values: Vec<_> = program.declarations.constants.iter().map(|c| c.value.clone()).collect();
        assert_eq!(
            values,
            [
                ConstValue::Integer(10),
                ConstValue::Text("hey".to_string()),
                ConstValue::Identifier("n".to_string())
            ]
        );
    }
}
