//! A pascalc compilation error

use crate::passes::semantic_analysis::SemanticError;
use itertools::Itertools as _;
use pascal_ast_parsing::lexer::{RuleSetError, TokenizeError};
use pascal_ast_parsing::parser::transforms::AstBuildError;
use pascal_ast_parsing::parser::SyntaxError;
use pascal_ast_parsing::token_file::TokenFileError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The kind of error
#[derive(Debug, Error)]
pub enum PascalCErrorKind {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("input is not valid {0}")]
    InvalidEncoding(&'static str),
    #[error("{}", .0.iter().join("\n"))]
    Multi(Vec<PascalCError>),
    #[error(transparent)]
    RuleSet(#[from] RuleSetError),
    #[error(transparent)]
    Lex(#[from] TokenizeError),
    #[error(transparent)]
    TokenFile(#[from] TokenFileError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    AstBuild(#[from] AstBuildError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// An error occurred while attempting to compile a Pascal-S unit
#[derive(Debug, Error)]
#[error("{}{kind}", .path.as_ref().map(|path| format!("{}: ", path.display())).unwrap_or_default())]
pub struct PascalCError {
    kind: PascalCErrorKind,
    path: Option<PathBuf>,
}

impl PascalCError {
    /// Creates a new [PascalCError] using a quick constructor
    #[inline]
    pub fn new(error: impl Into<PascalCErrorKind>, path: Option<PathBuf>) -> Self {
        Self {
            kind: error.into(),
            path,
        }
    }

    pub fn kind(&self) -> &PascalCErrorKind {
        &self.kind
    }

    /// The file being compiled, if known
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Attaches a path, unless one is already set
    pub fn with_path(mut self, path: &Path) -> Self {
        if self.path.is_none() {
            self.path = Some(path.to_path_buf());
        }
        self
    }

    /// Every semantic error this holds, looking through [PascalCErrorKind::Multi]
    pub fn semantic_errors(&self) -> Vec<&SemanticError> {
        match &self.kind {
            PascalCErrorKind::Semantic(e) => vec![e],
            PascalCErrorKind::Multi(errors) => {
                errors.iter().flat_map(|e| e.semantic_errors()).collect()
            }
            _ => vec![],
        }
    }
}

impl<T> From<T> for PascalCError
where
    PascalCErrorKind: From<T>,
{
    fn from(value: T) -> Self {
        Self::new(PascalCErrorKind::from(value), None)
    }
}

impl From<Vec<PascalCError>> for PascalCErrorKind {
    fn from(value: Vec<PascalCError>) -> Self {
        PascalCErrorKind::Multi(value)
    }
}

/// A type alias for general results in pascalc
pub type PascalCResult<T> = Result<T, PascalCError>;
