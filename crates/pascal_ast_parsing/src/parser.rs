//! Parsers used for creating the AST

pub mod syntactic_parser;
pub mod transforms;

pub use syntactic_parser::{
    parse, syntax_tree, CouldParse, ErrorKind, Expected, Parsable, Result, SyntacticParser,
    SyntaxError,
};

#[cfg(test)]
pub use syntactic_parser::tests::test_parser;
