//! Responsible with converting source text into a token stream

use itertools::Itertools;
use log::{debug, trace};
use pascal_ast::token::{Token, TokenKind};
use std::collections::VecDeque;
use thiserror::Error;

pub mod pattern;
mod rules;

pub use rules::{RuleSet, RuleSetError, StateId};

/// Identifiers that are reserved words
pub const KEYWORDS: [&str; 27] = [
    "program", "variabel", "mulai", "selesai", "jika", "maka", "selain-itu", "selama", "lakukan",
    "untuk", "ke", "turun-ke", "integer", "real", "boolean", "char", "larik", "dari", "prosedur",
    "fungsi", "konstanta", "tipe", "string", "kasus", "ulangi", "sampai", "rekaman",
];

/// Identifiers that are logical operators
pub const LOGICAL_OPERATORS: [&str; 3] = ["dan", "atau", "tidak"];

/// Identifiers that are arithmetic operators
pub const WORD_ARITHMETIC_OPERATORS: [&str; 2] = ["bagi", "mod"];

/// How comments in the source are handled
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CommentMode {
    /// Comments become a comment start, a comment body and a comment end token
    #[default]
    Split,
    /// Comments are skipped like whitespace
    Skip,
}

/// What the lexer does after a lexical error
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum OnLexError {
    /// Stop producing tokens
    #[default]
    Abort,
    /// Skip the offending character and keep going
    Recover,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct LexerOptions {
    pub comment_mode: CommentMode,
    pub on_error: OnLexError,
}

/// Runs a [RuleSet] over source text, producing tokens by maximal munch.
#[derive(Debug)]
pub struct Lexer<'r> {
    rules: &'r RuleSet,
    chars: Vec<char>,
    cursor: usize,
    options: LexerOptions,
    pending: VecDeque<Token>,
    done: bool,
}

impl<'r> Lexer<'r> {
    /// Creates a new lexer with the default options
    pub fn new(text: &str, rules: &'r RuleSet) -> Self {
        Self::with_options(text, rules, LexerOptions::default())
    }

    pub fn with_options(text: &str, rules: &'r RuleSet, options: LexerOptions) -> Self {
        Self {
            rules,
            chars: text.chars().collect(),
            cursor: 0,
            options,
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                trace!("lexed {token:?}");
                return Ok(Some(token));
            }
            self.skip_whitespace();
            if self.options.comment_mode == CommentMode::Skip {
                self.skip_comments()?;
            }
            if self.cursor >= self.chars.len() {
                return Ok(None);
            }
            self.scan()?;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.cursor < self.chars.len() && self.chars[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
    }

    fn starts_with(&self, at: usize, s: &str) -> bool {
        let mut i = at;
        for c in s.chars() {
            if self.chars.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn find_from(&self, from: usize, s: &str) -> Option<usize> {
        (from..self.chars.len()).find(|&i| self.starts_with(i, s))
    }

    fn skip_comments(&mut self) -> LexResult<()> {
        loop {
            self.skip_whitespace();
            let start = self.cursor;
            let (open, close) = if self.starts_with(start, "{") {
                ("{", "}")
            } else if self.starts_with(start, "(*") {
                ("(*", "*)")
            } else if self.starts_with(start, "//") {
                ("//", "\n")
            } else {
                return Ok(());
            };
            let body = start + open.chars().count();
            match self.find_from(body, close) {
                Some(end) => self.cursor = end + close.chars().count(),
                None if open == "//" => self.cursor = self.chars.len(),
                None => {
                    self.cursor = self.chars.len();
                    return Err(LexingError::UnclosedComment {
                        delimiter: open,
                        position: start,
                    });
                }
            }
        }
    }

    /// Walks the automaton from the cursor, emitting the longest accepted lexeme.
    fn scan(&mut self) -> LexResult<()> {
        let start = self.cursor;
        let mut state = self.rules.start();
        let mut pos = start;
        let mut checkpoint: Option<(TokenKind, usize)> = None;
        let mut sign_split: Option<usize> = None;

        while let Some(&c) = self.chars.get(pos) {
            let Some(next) = self.rules.transition(state, c) else {
                break;
            };
            if sign_split.is_none()
                && (c == '+' || c == '-')
                && self.rules.accepts(state) == Some(TokenKind::Number)
                && self.rules.accepts(next) != Some(TokenKind::Number)
            {
                sign_split = Some(pos);
            }
            state = next;
            pos += 1;
            if let Some(kind) = self.rules.accepts(state) {
                checkpoint = Some((kind, pos));
            }
        }

        if let Some(message) = self.rules.error_message(state) {
            return Err(self.fail(LexingError::ErrorState {
                message: message.to_string(),
                lexeme: self.chars[start..pos].iter().collect(),
                position: start,
            }));
        }
        let Some((kind, end)) = checkpoint else {
            return Err(self.fail(LexingError::UnexpectedChar {
                ch: self.chars[start],
                position: start,
            }));
        };

        match sign_split {
            Some(split) if split < end => {
                self.push(TokenKind::Number, start, split);
                self.push(TokenKind::ArithmeticOperator, split, split + 1);
                if split + 1 < end {
                    self.push(kind, split + 1, end);
                }
            }
            _ if kind == TokenKind::Comment => self.push_comment(start, end),
            _ if kind == TokenKind::Identifier => {
                let text: String = self.chars[start..end].iter().collect();
                let kind = classify_word(&text);
                self.pending.push_back(Token::new(kind, text, start));
            }
            _ => self.push(kind, start, end),
        }
        self.cursor = end;
        Ok(())
    }

    /// Records the lexer state after an error, returning the error
    fn fail(&mut self, error: LexingError) -> LexingError {
        match self.options.on_error {
            OnLexError::Abort => self.done = true,
            OnLexError::Recover => {
                debug!("recovering from {error}");
                self.cursor += 1;
            }
        }
        error
    }

    fn push(&mut self, kind: TokenKind, from: usize, to: usize) {
        let text: String = self.chars[from..to].iter().collect();
        self.pending.push_back(Token::new(kind, text, from));
    }

    fn push_comment(&mut self, start: usize, end: usize) {
        let delimiters = [("{", "}"), ("(*", "*)"), ("//", "\n")];
        let Some((open, close)) = delimiters
            .into_iter()
            .find(|(open, _)| self.starts_with(start, open))
        else {
            self.push(TokenKind::Comment, start, end);
            return;
        };
        let body_start = start + open.chars().count();
        let close_len = close.chars().count();
        let closed = end >= body_start + close_len && self.starts_with(end - close_len, close);
        let body_end = if closed { end - close_len } else { end };

        self.push(TokenKind::CommentStart, start, body_start);
        self.push(TokenKind::Comment, body_start, body_end);
        if closed {
            self.push(TokenKind::CommentEnd, body_end, end);
        }
    }
}

/// Reclassifies an identifier lexeme by its case folded text
fn classify_word(text: &str) -> TokenKind {
    let lower = text.to_lowercase();
    if KEYWORDS.contains(&lower.as_str()) {
        TokenKind::Keyword
    } else if LOGICAL_OPERATORS.contains(&lower.as_str()) {
        TokenKind::LogicalOperator
    } else if WORD_ARITHMETIC_OPERATORS.contains(&lower.as_str()) {
        TokenKind::ArithmeticOperator
    } else {
        TokenKind::Identifier
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done && self.pending.is_empty() {
            return None;
        }
        match self.next_token() {
            Ok(option) => option.map(Ok),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Merges the hyphenated keywords `selain-itu` and `turun-ke`, which the automaton sees as three
/// tokens.
pub fn merge_compound_keywords(tokens: Vec<Token>) -> Vec<Token> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let Some((first, minus, third)) = tokens[i..].iter().next_tuple::<(&Token, &Token, &Token)>() {
            let is_compound = minus.is(TokenKind::ArithmeticOperator, "-")
                && ((first.is(TokenKind::Identifier, "selain") && third.is(TokenKind::Identifier, "itu"))
                    || (first.is(TokenKind::Identifier, "turun")
                        && (third.is(TokenKind::Identifier, "ke") || third.is(TokenKind::Keyword, "ke"))));
            if is_compound {
                let text = format!("{}-{}", first.text(), third.text()).to_lowercase();
                trace!("merged compound keyword {text:?}");
                merged.push(Token::new(TokenKind::Keyword, text, first.position()));
                i += 3;
                continue;
            }
        }
        merged.push(tokens[i].clone());
        i += 1;
    }
    merged
}

/// Tokenizes source text with the default options
pub fn tokenize(text: &str, rules: &RuleSet) -> Result<Vec<Token>, TokenizeError> {
    tokenize_with(text, rules, LexerOptions::default())
}

/// Tokenizes source text, then merges compound keywords.
///
/// Fails if any lexical error occurred. With [OnLexError::Recover] every error is collected, the
/// tokens lexed around them are kept in the error.
pub fn tokenize_with(
    text: &str,
    rules: &RuleSet,
    options: LexerOptions,
) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens = vec![];
    let mut errors = vec![];
    for result in Lexer::with_options(text, rules, options) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }
    let tokens = merge_compound_keywords(tokens);
    debug!("lexed {} tokens with {} errors", tokens.len(), errors.len());
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(TokenizeError { tokens, errors })
    }
}

type LexResult<T> = Result<T, LexingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexingError {
    /// Input stopped while the automaton was in an error state
    #[error("{message} at position {position}: {lexeme:?}")]
    ErrorState {
        message: String,
        lexeme: String,
        position: usize,
    },
    #[error("Unexpected character {ch:?} at position {position}")]
    UnexpectedChar { ch: char, position: usize },
    #[error("Comment starting with '{delimiter}' at position {position} is not closed")]
    UnclosedComment {
        delimiter: &'static str,
        position: usize,
    },
}

/// Lexical errors, with the tokens that were produced anyway
#[derive(Debug, Error)]
#[error("{}", .errors.iter().join("\n"))]
pub struct TokenizeError {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexingError>,
}
