//! Resolution results written onto the tree by semantic analysis

use crate::typed::{TypeError, TypeState, Typed, TypedMut};
use itertools::Itertools;
use pascal_types::DataType;
use std::fmt::{Display, Formatter};

/// What a name in the tree was bound to
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SymbolRef {
    /// An index into the symbol table's identifier table
    Entry(usize),
    /// A predefined routine or constant that has no table entry
    Builtin,
}

/// The decoration of a single node
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Decoration {
    pub symbol: Option<SymbolRef>,
    pub ty: TypeState<DataType>,
    pub level: Option<usize>,
}

impl Decoration {
    /// Whether semantic analysis recorded anything on this node
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none() && matches!(self.ty, TypeState::Unavailable) && self.level.is_none()
    }

    /// The symbol table index, if this node is bound to an entry
    pub fn entry(&self) -> Option<usize> {
        match self.symbol {
            Some(SymbolRef::Entry(index)) => Some(index),
            _ => None,
        }
    }

    /// The resolved data type, if any
    pub fn data_type(&self) -> Option<DataType> {
        self.ty.get_available().copied()
    }
}

/// Writes the ` → tab_index:i, type:t, lev:l` annotation, or nothing for an empty decoration.
impl Display for Decoration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.symbol == Some(SymbolRef::Builtin) && self.data_type().is_none() {
            return write!(f, " → predefined");
        }
        let parts = [
            self.entry().map(|index| format!("tab_index:{index}")),
            self.data_type().map(|ty| format!("type:{ty}")),
            self.level.map(|level| format!("lev:{level}")),
        ]
        .into_iter()
        .flatten()
        .join(", ");
        if !parts.is_empty() {
            write!(f, " → {parts}")?;
        }
        Ok(())
    }
}

/// A node that carries a decoration
pub trait Decorated {
    fn decoration(&self) -> &Decoration;
    fn decoration_mut(&mut self) -> &mut Decoration;
}

impl<D: Decorated> Typed<DataType> for D {
    fn get_type(&self) -> TypeState<&DataType, &TypeError> {
        self.decoration().ty.as_ref()
    }
}

impl<D: Decorated> TypedMut<DataType> for D {
    fn get_type_mut(&mut self) -> &mut TypeState<DataType, TypeError> {
        &mut self.decoration_mut().ty
    }
}

/// Implements [`Decorated`] for structs with a `decoration` field
macro_rules! decorated {
    ($($ty:ty),* $(,)?) => {
        $(
        impl $crate::decoration::Decorated for $ty {
            fn decoration(&self) -> &$crate::decoration::Decoration {
                &self.decoration
            }

            fn decoration_mut(&mut self) -> &mut $crate::decoration::Decoration {
                &mut self.decoration
            }
        }
        )*
    };
}
pub(crate) use decorated;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_lists_known_parts() {
        let decoration = Decoration {
            symbol: Some(SymbolRef::Entry(33)),
            ty: TypeState::Available(DataType::Integer),
            level: Some(1),
        };
        assert_eq!(decoration.to_string(), " → tab_index:33, type:integer, lev:1");
        assert_eq!(Decoration::default().to_string(), "");
        let level_only = Decoration {
            level: Some(2),
            ..Default::default()
        };
        assert_eq!(level_only.to_string(), " → lev:2");
    }

    #[test]
    fn builtin_routine_is_predefined() {
        let decoration = Decoration {
            symbol: Some(SymbolRef::Builtin),
            ty: TypeState::Unavailable,
            level: Some(0),
        };
        assert_eq!(decoration.to_string(), " → predefined");
    }
}
