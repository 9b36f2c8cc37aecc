//! Operators and their typing rules

use crate::DataType;
use strum::{AsRefStr, EnumString};
use std::fmt::{Display, Formatter};

/// A binary operator
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "bagi")]
    IntDivide,
    #[strum(serialize = "mod")]
    Modulo,
    #[strum(serialize = "=")]
    Eq,
    #[strum(serialize = "<>")]
    Neq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<=")]
    Lte,
    #[strum(serialize = ">=")]
    Gte,
    #[strum(serialize = "dan")]
    And,
    #[strum(serialize = "atau")]
    Or,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl BinaryOp {
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Neq | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Lte | BinaryOp::Gte
        )
    }

    /// Computes the type of `left <op> right`.
    pub fn result_type(&self, left: DataType, right: DataType) -> Result<DataType, OperatorTypeError> {
        use DataType::*;
        match self {
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply => {
                if left.is_numeric() && right.is_numeric() {
                    if left == Real || right == Real {
                        Ok(Real)
                    } else {
                        Ok(Integer)
                    }
                } else if *self == BinaryOp::Add && (left == String || right == String) {
                    Ok(String)
                } else {
                    Err(OperatorTypeError::InvalidOperands(*self))
                }
            }
            BinaryOp::Divide => {
                if left.is_numeric() && right.is_numeric() {
                    Ok(Real)
                } else {
                    Err(OperatorTypeError::InvalidOperands(*self))
                }
            }
            BinaryOp::IntDivide | BinaryOp::Modulo => {
                if left == Integer && right == Integer {
                    Ok(Integer)
                } else {
                    Err(OperatorTypeError::RequiresInteger(*self))
                }
            }
            BinaryOp::Eq | BinaryOp::Neq | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Lte | BinaryOp::Gte => {
                if left.is_compatible_with(&right) {
                    Ok(Boolean)
                } else {
                    Err(OperatorTypeError::Incomparable(left, right))
                }
            }
            BinaryOp::And | BinaryOp::Or => {
                if left == Boolean && right == Boolean {
                    Ok(Boolean)
                } else {
                    Err(OperatorTypeError::RequiresBoolean(*self))
                }
            }
        }
    }
}

/// A unary operator
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum UnaryOp {
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Negate,
    #[strum(serialize = "tidak")]
    Not,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl UnaryOp {
    /// Computes the type of `<op> operand`. Sign operators keep the operand's type.
    pub fn result_type(&self, operand: DataType) -> Result<DataType, OperatorTypeError> {
        match self {
            UnaryOp::Plus | UnaryOp::Negate => {
                if operand.is_numeric() {
                    Ok(operand)
                } else {
                    Err(OperatorTypeError::RequiresNumeric(*self))
                }
            }
            UnaryOp::Not => {
                if operand == DataType::Boolean {
                    Ok(DataType::Boolean)
                } else {
                    Err(OperatorTypeError::NotRequiresBoolean)
                }
            }
        }
    }
}

/// Operand types that an operator can't be applied to
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum OperatorTypeError {
    #[error("Invalid operand types for '{0}'")]
    InvalidOperands(BinaryOp),
    #[error("'{0}' requires integer operands")]
    RequiresInteger(BinaryOp),
    #[error("Cannot compare {0} with {1}")]
    Incomparable(DataType, DataType),
    #[error("'{0}' requires boolean operands")]
    RequiresBoolean(BinaryOp),
    #[error("Unary '{0}' requires numeric operand")]
    RequiresNumeric(UnaryOp),
    #[error("'tidak' requires boolean operand")]
    NotRequiresBoolean,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use DataType::*;

    #[test]
    fn parse_word_operators() {
        assert_eq!(BinaryOp::from_str("BAGI").unwrap(), BinaryOp::IntDivide);
        assert_eq!(BinaryOp::from_str("atau").unwrap(), BinaryOp::Or);
        assert_eq!(BinaryOp::from_str("<>").unwrap(), BinaryOp::Neq);
        assert_eq!(UnaryOp::from_str("Tidak").unwrap(), UnaryOp::Not);
        assert!(BinaryOp::from_str("xor").is_err());
    }

    #[test]
    fn arithmetic_widens_to_real() {
        assert_eq!(BinaryOp::Add.result_type(Integer, Integer), Ok(Integer));
        assert_eq!(BinaryOp::Multiply.result_type(Integer, Real), Ok(Real));
        assert_eq!(BinaryOp::Divide.result_type(Integer, Integer), Ok(Real));
    }

    #[test]
    fn plus_concatenates_strings() {
        assert_eq!(BinaryOp::Add.result_type(String, Char), Ok(String));
        assert_eq!(
            BinaryOp::Subtract.result_type(String, String).unwrap_err().to_string(),
            "Invalid operand types for '-'"
        );
    }

    #[test]
    fn integer_only_operators() {
        assert_eq!(BinaryOp::Modulo.result_type(Integer, Integer), Ok(Integer));
        assert_eq!(
            BinaryOp::IntDivide.result_type(Real, Integer).unwrap_err().to_string(),
            "'bagi' requires integer operands"
        );
    }

    #[test]
    fn comparisons() {
        assert_eq!(BinaryOp::Lte.result_type(Integer, Real), Ok(Boolean));
        assert_eq!(BinaryOp::Eq.result_type(Char, String), Ok(Boolean));
        assert_eq!(
            BinaryOp::Eq.result_type(Boolean, Integer).unwrap_err().to_string(),
            "Cannot compare boolean with integer"
        );
    }

    #[test]
    fn logical_and_unary() {
        assert_eq!(BinaryOp::And.result_type(Boolean, Boolean), Ok(Boolean));
        assert_eq!(
            BinaryOp::Or.result_type(Boolean, Integer).unwrap_err().to_string(),
            "'atau' requires boolean operands"
        );
        assert_eq!(UnaryOp::Negate.result_type(Real), Ok(Real));
        assert_eq!(
            UnaryOp::Negate.result_type(Char).unwrap_err().to_string(),
            "Unary '-' requires numeric operand"
        );
        assert_eq!(
            UnaryOp::Not.result_type(Integer).unwrap_err().to_string(),
            "'tidak' requires boolean operand"
        );
    }
}
