#![doc = include_str!("../README.md")]

pub mod decoration;
pub mod declarations;
pub mod expr;
pub mod printer;
pub mod program;
pub mod statements;
pub mod token;
pub mod tree;
pub mod typed;
