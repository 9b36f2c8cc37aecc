//! The closed set of Pascal-S data types

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A data type that an expression, symbol or declaration can have.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DataType {
    Void,
    Integer,
    Real,
    Boolean,
    Char,
    Array,
    String,
}

impl DataType {
    /// Integer or real
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Real)
    }

    /// Checks whether a value of one type can stand in for the other, for assignment, comparison
    /// and argument passing.
    ///
    /// Identical types are compatible, as are integer with real and char with string.
    pub fn is_compatible_with(&self, other: &DataType) -> bool {
        use DataType::*;
        self == other
            || matches!(
                (self, other),
                (Integer, Real) | (Real, Integer) | (Char, String) | (String, Char)
            )
    }
}
