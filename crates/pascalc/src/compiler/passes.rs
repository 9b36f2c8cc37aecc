//! The passes run over an abstract syntax tree once it's built

pub mod semantic_analysis;
