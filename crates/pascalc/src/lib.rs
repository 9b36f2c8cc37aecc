#![doc = include_str!("../README.md")]

pub mod symbol_table;
mod compiler;
pub use compiler::*;
