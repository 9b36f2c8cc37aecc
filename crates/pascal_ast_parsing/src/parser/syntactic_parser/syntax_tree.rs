//! The typed parse tree. Every node keeps all of its tokens, keywords and punctuation included,
//! in the order the grammar lists them.

mod helpers;
pub mod parse_tree;
pub mod singletons;

mod expr;
mod items;
mod statement;

pub use expr::*;
pub use helpers::Punctuated;
pub use items::*;
pub use statement::*;
