use strum::{AsRefStr, Display, EnumString};

/// The role an identifier plays once it's entered into the symbol table
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ObjectKind {
    Constant,
    Variable,
    Parameter,
    Type,
    Procedure,
    Function,
    Program,
}

impl ObjectKind {
    /// Procedures and functions
    pub fn is_routine(&self) -> bool {
        matches!(self, ObjectKind::Procedure | ObjectKind::Function)
    }

    /// Whether an identifier of this kind can be read as a value in an expression.
    ///
    /// A function's name is readable inside its own body, where it holds the return value.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            ObjectKind::Variable | ObjectKind::Parameter | ObjectKind::Constant | ObjectKind::Function
        )
    }
}
