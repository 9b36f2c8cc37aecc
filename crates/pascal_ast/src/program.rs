//! The root of the tree

use crate::declarations::DeclarationPart;
use crate::decoration::{decorated, Decoration};
use crate::statements::CompoundStatement;

/// A whole program: its header name, its declarations and its main body
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub declarations: DeclarationPart,
    pub body: CompoundStatement,
    pub decoration: Decoration,
}

impl Program {
    pub fn new(name: impl Into<String>, declarations: DeclarationPart, body: CompoundStatement) -> Self {
        Self {
            name: name.into(),
            declarations,
            body,
            decoration: Decoration::default(),
        }
    }
}

decorated!(Program);
