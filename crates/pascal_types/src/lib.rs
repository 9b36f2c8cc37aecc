#![doc = include_str!("../README.md")]

pub mod data_type;
pub mod object_kind;
pub mod operators;

pub use data_type::DataType;
pub use object_kind::ObjectKind;
pub use operators::{BinaryOp, OperatorTypeError, UnaryOp};
