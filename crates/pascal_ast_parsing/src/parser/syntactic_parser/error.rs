use itertools::Itertools;
use pascal_ast::token::{Token, TokenKind};
use std::fmt::{Display, Formatter};

/// Represents an error occurring during parsing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct SyntaxError {
    /// Index of the offending token in the full token stream, comments included
    pub position: usize,
    pub kind: ErrorKind,
    pub non_terminal_stack: Vec<&'static str>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(kind: ErrorKind, position: usize, non_terminals: Vec<&'static str>) -> Self {
        Self {
            position,
            kind,
            non_terminal_stack: non_terminals,
        }
    }
}

/// The alternate form (`{:#}`) also lists the non-terminals being parsed when the error occurred.
impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at position {}: {}", self.position, self.kind)?;
        if f.alternate() && !self.non_terminal_stack.is_empty() {
            writeln!(f)?;
            writeln!(f, "non terminal stack:")?;
            for (idx, non_terminal) in self.non_terminal_stack.iter().enumerate() {
                writeln!(f, "  {}: {}", idx, non_terminal)?;
            }
        }
        Ok(())
    }
}

/// Something the parser was looking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// A token of a kind, with fixed text when the kind or grammar demands it
    Token {
        kind: TokenKind,
        text: Option<&'static str>,
    },
    /// Anything that begins a non-terminal
    Production(&'static str),
}

impl Expected {
    /// A token of this kind, with the kind's own symbol if it has one
    pub fn kind(kind: TokenKind) -> Self {
        Expected::Token {
            kind,
            text: kind.symbol(),
        }
    }

    pub fn keyword(keyword: &'static str) -> Self {
        Expected::Token {
            kind: TokenKind::Keyword,
            text: Some(keyword),
        }
    }
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token { kind, text: Some(text) } => write!(f, "{kind}({text})"),
            Expected::Token { kind, text: None } => write!(f, "{kind}"),
            Expected::Production(production) => write!(f, "{production}"),
        }
    }
}

/// [SyntaxError] kind
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("unexpected token {found}, expected {expected}")]
    UnexpectedToken { found: Token, expected: Expected },
    #[error("unexpected token {found}, expected one of {}", .expected.iter().join(", "))]
    ExpectedOneOf {
        found: Token,
        expected: Vec<Expected>,
    },
    #[error("Expected {expected}, but reached end of input")]
    UnexpectedEof { expected: Expected },
}

impl ErrorKind {
    /// An error for finding `found`, or the end of input, instead of `expected`
    pub fn expected(expected: Expected, found: Option<&Token>) -> Self {
        match found {
            Some(found) => ErrorKind::UnexpectedToken {
                found: found.clone(),
                expected,
            },
            None => ErrorKind::UnexpectedEof { expected },
        }
    }

    /// An error for finding `found`, or the end of input, instead of any of `expected`
    pub fn expected_one_of(
        expected: impl IntoIterator<Item = Expected>,
        production: &'static str,
        found: Option<&Token>,
    ) -> Self {
        match found {
            Some(found) => ErrorKind::ExpectedOneOf {
                found: found.clone(),
                expected: expected.into_iter().collect(),
            },
            None => ErrorKind::UnexpectedEof {
                expected: Expected::Production(production),
            },
        }
    }
}

pub type Result<T = ()> = std::result::Result<T, SyntaxError>;
