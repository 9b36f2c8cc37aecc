#![doc = include_str!("../README.md")]

pub mod lexer;
pub mod parser;
pub mod token_file;
