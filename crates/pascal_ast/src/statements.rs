//! Statements

use crate::decoration::{decorated, Decoration};
use crate::expr::{ArrayAccess, Expr, VarRef};
use strum::{AsRefStr, Display};

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Compound(CompoundStatement),
    Assignment(Assignment),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Repeat(RepeatStatement),
    ProcedureCall(ProcedureCall),
    Empty,
}

/// `mulai ... selesai`, with empty statements already dropped
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompoundStatement {
    pub statements: Vec<Statement>,
    pub decoration: Decoration,
}

impl CompoundStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            decoration: Decoration::default(),
        }
    }
}

/// `target := value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: AssignTarget,
    pub value: Expr,
    pub decoration: Decoration,
}

/// The left hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Variable(VarRef),
    Element(ArrayAccess),
}

impl AssignTarget {
    /// The name being assigned to
    pub fn name(&self) -> &str {
        match self {
            AssignTarget::Variable(v) => &v.name,
            AssignTarget::Element(a) => &a.array,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub decoration: Decoration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Box<Statement>,
    pub decoration: Decoration,
}

/// `untuk variable := start ke|turun-ke end lakukan body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub variable: String,
    pub start: Expr,
    pub end: Expr,
    pub direction: ForDirection,
    pub body: Box<Statement>,
    pub decoration: Decoration,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, AsRefStr)]
pub enum ForDirection {
    #[strum(serialize = "to")]
    To,
    #[strum(serialize = "downto")]
    DownTo,
}

/// `ulangi body sampai condition`
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    pub body: Vec<Statement>,
    pub condition: Expr,
    pub decoration: Decoration,
}

/// A call used as a statement
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub decoration: Decoration,
}

decorated!(
    CompoundStatement,
    Assignment,
    IfStatement,
    WhileStatement,
    ForStatement,
    RepeatStatement,
    ProcedureCall
);
