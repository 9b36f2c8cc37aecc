//! Diagnostics reported by semantic analysis

use pascal_types::{DataType, ObjectKind, OperatorTypeError};
use thiserror::Error;

/// A failed semantic check. Analysis keeps going after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Duplicate declaration of {kind} '{name}'")]
    Duplicate { kind: ObjectKind, name: String },
    #[error("Duplicate parameter '{0}'")]
    DuplicateParameter(String),
    #[error("Undeclared constant '{0}'")]
    UndeclaredConstant(String),
    #[error("Unknown type '{0}'")]
    UnknownType(String),
    #[error("Type mismatch in assignment: cannot assign {value} to {target}")]
    AssignmentMismatch { value: DataType, target: DataType },
    #[error("Cannot assign to constant '{0}'")]
    AssignToConstant(String),
    #[error("If condition must be a boolean expression")]
    IfCondition,
    #[error("While condition must be a boolean expression")]
    WhileCondition,
    #[error("Repeat-until condition must be a boolean expression")]
    RepeatCondition,
    #[error("Undeclared loop variable '{0}'")]
    UndeclaredLoopVariable(String),
    #[error("Loop variable '{0}' must be integer")]
    LoopVariableNotInteger(String),
    #[error("For loop start value must be integer")]
    ForStart,
    #[error("For loop end value must be integer")]
    ForEnd,
    #[error("Undeclared procedure '{0}'")]
    UndeclaredProcedure(String),
    #[error("'{0}' is not a procedure")]
    NotAProcedure(String),
    #[error("Undeclared function '{0}'")]
    UndeclaredFunction(String),
    #[error("'{0}' is not a function")]
    NotAFunction(String),
    #[error("Wrong number of arguments for '{name}': expected {expected}, got {found}")]
    WrongArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("Argument {position} of '{name}': cannot pass {found} as {expected}")]
    ArgumentMismatch {
        name: String,
        position: usize,
        found: DataType,
        expected: DataType,
    },
    #[error("Undeclared variable '{0}'")]
    UndeclaredVariable(String),
    #[error("'{0}' is not a variable")]
    NotAVariable(String),
    #[error("Undeclared array '{0}'")]
    UndeclaredArray(String),
    #[error("'{0}' is not an array")]
    NotAnArray(String),
    #[error("Array index must be integer")]
    ArrayIndexNotInteger,
    #[error("Array bounds {low}..{high} are too large")]
    ArrayTooLarge { low: i64, high: i64 },
    #[error(transparent)]
    Operator(#[from] OperatorTypeError),
}

/// Something suspicious that doesn't stop the program from being valid
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SemanticWarning {
    #[display(fmt = "Range bounds should be integer expressions")]
    RangeBoundsNotInteger,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pascal_types::BinaryOp;

    #[test]
    fn messages_use_type_names() {
        let error = SemanticError::AssignmentMismatch {
            value: DataType::Char,
            target: DataType::Integer,
        };
        assert_eq!(
            error.to_string(),
            "Type mismatch in assignment: cannot assign char to integer"
        );
        let error = SemanticError::Duplicate {
            kind: ObjectKind::Variable,
            name: "x".to_string(),
        };
        assert_eq!(error.to_string(), "Duplicate declaration of variable 'x'");
    }

    #[test]
    fn operator_errors_pass_through() {
        let error = SemanticError::from(OperatorTypeError::RequiresInteger(BinaryOp::Modulo));
        assert_eq!(error.to_string(), "'mod' requires integer operands");
        assert_eq!(
            SemanticWarning::RangeBoundsNotInteger.to_string(),
            "Range bounds should be integer expressions"
        );
    }
}
