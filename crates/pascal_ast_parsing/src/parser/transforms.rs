//! Transforms from the typed parse tree into the AST

mod to_ast;

pub use to_ast::{to_ast, AstBuildError};
