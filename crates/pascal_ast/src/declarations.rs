//! Declarations, with one node per declared name

use crate::decoration::{decorated, Decoration};
use crate::expr::Expr;
use crate::statements::CompoundStatement;
use pascal_types::DataType;
use std::fmt::{Display, Formatter};
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

/// The declarations of a program or subprogram block, in declaration order per section
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeclarationPart {
    pub constants: Vec<ConstDecl>,
    pub types: Vec<TypeDecl>,
    pub variables: Vec<VarDecl>,
    pub subprograms: Vec<Subprogram>,
}

impl DeclarationPart {
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
            && self.types.is_empty()
            && self.variables.is_empty()
            && self.subprograms.is_empty()
    }
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: String,
    pub value: ConstValue,
    pub decoration: Decoration,
}

/// The literal a constant is defined as
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Integer(i64),
    Real(f64),
    /// A quoted literal with its quotes removed
    Text(String),
    /// Another named constant
    Identifier(String),
}

impl Display for ConstValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstValue::Integer(i) => write!(f, "{i}"),
            ConstValue::Real(r) => write!(f, "{r}"),
            ConstValue::Text(s) => write!(f, "'{s}'"),
            ConstValue::Identifier(id) => write!(f, "{id}"),
        }
    }
}

/// `name = type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub ty: TypeSpec,
    pub decoration: Decoration,
}

/// A single declared variable
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub ty: TypeSpec,
    pub decoration: Decoration,
}

/// A single formal parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeSpec,
    pub decoration: Decoration,
}

/// A procedure, or a function when it has a return type
#[derive(Debug, Clone, PartialEq)]
pub struct Subprogram {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeSpec>,
    pub declarations: DeclarationPart,
    pub body: CompoundStatement,
    pub decoration: Decoration,
}

impl Subprogram {
    pub fn is_function(&self) -> bool {
        self.return_type.is_some()
    }
}

decorated!(ConstDecl, TypeDecl, VarDecl, Param, Subprogram);

/// A type as written in a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    Primitive(PrimitiveType),
    Array(ArrayType),
    /// A name declared in a `tipe` section
    Custom(String),
    Range(RangeSpec),
}

impl Display for TypeSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeSpec::Primitive(p) => write!(f, "{p}"),
            TypeSpec::Array(array) => write!(f, "array of {}", array.element),
            TypeSpec::Custom(name) => write!(f, "{name}"),
            TypeSpec::Range(_) => write!(f, "range"),
        }
    }
}

/// A built-in scalar type
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumString, AsRefStr, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PrimitiveType {
    Integer,
    Real,
    Boolean,
    Char,
    String,
}

impl PrimitiveType {
    pub fn data_type(&self) -> DataType {
        match self {
            PrimitiveType::Integer => DataType::Integer,
            PrimitiveType::Real => DataType::Real,
            PrimitiveType::Boolean => DataType::Boolean,
            PrimitiveType::Char => DataType::Char,
            PrimitiveType::String => DataType::String,
        }
    }
}

/// `larik [range] dari element`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub range: RangeSpec,
    pub element: Box<TypeSpec>,
}

/// `start .. end`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSpec {
    pub start: Expr,
    pub end: Expr,
}
