//! Expressions

use crate::decoration::{decorated, Decorated, Decoration};
use pascal_types::{BinaryOp, UnaryOp};
use std::fmt::{Display, Formatter};

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Variable(VarRef),
    Index(ArrayAccess),
    Call(FunctionCall),
    Number(NumberLiteral),
    Char(CharLiteral),
    String(StringLiteral),
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            decoration: Decoration::default(),
        })
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            decoration: Decoration::default(),
        })
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(VarRef::new(name))
    }

    pub fn integer(value: i64) -> Self {
        Expr::Number(NumberLiteral::new(Number::Integer(value)))
    }

    pub fn real(value: f64) -> Self {
        Expr::Number(NumberLiteral::new(Number::Real(value)))
    }

    /// If this is an integer literal, optionally negated, gets its value
    pub fn as_integer_literal(&self) -> Option<i64> {
        match self {
            Expr::Number(NumberLiteral {
                value: Number::Integer(i),
                ..
            }) => Some(*i),
            Expr::Unary(UnaryExpr {
                op: UnaryOp::Negate,
                operand,
                ..
            }) => operand.as_integer_literal().map(|i| -i),
            Expr::Unary(UnaryExpr {
                op: UnaryOp::Plus,
                operand,
                ..
            }) => operand.as_integer_literal(),
            _ => None,
        }
    }
}

impl Decorated for Expr {
    fn decoration(&self) -> &Decoration {
        match self {
            Expr::Binary(e) => &e.decoration,
            Expr::Unary(e) => &e.decoration,
            Expr::Variable(e) => &e.decoration,
            Expr::Index(e) => &e.decoration,
            Expr::Call(e) => &e.decoration,
            Expr::Number(e) => &e.decoration,
            Expr::Char(e) => &e.decoration,
            Expr::String(e) => &e.decoration,
        }
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        match self {
            Expr::Binary(e) => &mut e.decoration,
            Expr::Unary(e) => &mut e.decoration,
            Expr::Variable(e) => &mut e.decoration,
            Expr::Index(e) => &mut e.decoration,
            Expr::Call(e) => &mut e.decoration,
            Expr::Number(e) => &mut e.decoration,
            Expr::Char(e) => &mut e.decoration,
            Expr::String(e) => &mut e.decoration,
        }
    }
}

/// Writes the expression back out in source form, fully parenthesized
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Binary(b) => write!(f, "({} {} {})", b.left, b.op, b.right),
            Expr::Unary(u) => write!(f, "({} {})", u.op, u.operand),
            Expr::Variable(v) => write!(f, "{}", v.name),
            Expr::Index(a) => write!(f, "{}[{}]", a.array, a.index),
            Expr::Call(c) => {
                write!(f, "{}(", c.name)?;
                for (i, arg) in c.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::Number(n) => write!(f, "{}", n.value),
            Expr::Char(c) => write!(f, "'{}'", c.value),
            Expr::String(s) => write!(f, "'{}'", s.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub decoration: Decoration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub decoration: Decoration,
}

/// A bare name used as a value
#[derive(Debug, Clone, PartialEq)]
pub struct VarRef {
    pub name: String,
    pub decoration: Decoration,
}

impl VarRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decoration: Decoration::default(),
        }
    }
}

/// `array[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub array: String,
    pub index: Box<Expr>,
    pub decoration: Decoration,
}

/// A call used as a value
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub decoration: Decoration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: Number,
    pub decoration: Decoration,
}

impl NumberLiteral {
    pub fn new(value: Number) -> Self {
        Self {
            value,
            decoration: Decoration::default(),
        }
    }
}

/// A numeric literal's value
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Real(r) => write!(f, "{r:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharLiteral {
    pub value: char,
    pub decoration: Decoration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub decoration: Decoration,
}

decorated!(
    BinaryExpr,
    UnaryExpr,
    VarRef,
    ArrayAccess,
    FunctionCall,
    NumberLiteral,
    CharLiteral,
    StringLiteral
);
