//! A lexical token from a source file, along with streams for said token

use std::collections::VecDeque;
use std::fmt::{Debug, Display, Formatter, Write};
use std::iter;
use strum::{AsRefStr, EnumIter, EnumString};

/// A lexical token from a source file
#[derive(Clone)]
pub struct Token {
    kind: TokenKind,
    text: String,
    position: usize,
}

impl Token {
    /// Creates a new token found at the given character offset
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Creates a token that has no location in a source file, such as one read from a token file
    pub fn detached(kind: TokenKind, text: impl Into<String>) -> Self {
        Self::new(kind, text, 0)
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Gets the literal text of this token
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The character offset of the start of this token
    pub fn position(&self) -> usize {
        self.position
    }

    /// Checks both the kind and, ignoring ascii case, the text of this token
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text.eq_ignore_ascii_case(text)
    }

    /// Checks if this token is the given keyword
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is(TokenKind::Keyword, keyword)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self, self.position)
    }
}

/// Writes the token in its `KIND(text)` form, with backslashes and newlines escaped.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.kind)?;
        for c in self.text.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                c => f.write_char(c)?,
            }
        }
        f.write_char(')')
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

/// The kind for this token
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    CharLiteral,
    StringLiteral,
    ArithmeticOperator,
    RelationalOperator,
    LogicalOperator,
    AssignOperator,
    RangeOperator,
    Semicolon,
    Comma,
    Colon,
    Dot,
    #[strum(serialize = "LPARENTHESIS")]
    LParenthesis,
    #[strum(serialize = "RPARENTHESIS")]
    RParenthesis,
    #[strum(serialize = "LBRACKET")]
    LBracket,
    #[strum(serialize = "RBRACKET")]
    RBracket,
    CommentStart,
    Comment,
    CommentEnd,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl TokenKind {
    /// Comment tokens, which carry no meaning for the parser
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::CommentStart | TokenKind::Comment | TokenKind::CommentEnd
        )
    }

    /// The only text a token of this kind can have, if its kind fixes it
    pub fn symbol(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::LParenthesis => "(",
            TokenKind::RParenthesis => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::AssignOperator => ":=",
            TokenKind::RangeOperator => "..",
            _ => return None,
        })
    }
}

/// A stream of tokens
pub struct TokenStream(VecDeque<Token>);

impl FromIterator<Token> for TokenStream {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }
}

impl Default for TokenStream {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStream {
    #[inline]
    pub fn new() -> Self {
        TokenStream::from_iter(iter::empty())
    }
}

/// A trait to convert something back into the tokens it was parsed from
pub trait ToTokens {
    /// Gets an iterator over tokens
    fn to_tokens(&self) -> TokenStream;
}

impl ToTokens for Token {
    fn to_tokens(&self) -> TokenStream {
        TokenStream::from_iter([self.clone()])
    }
}

impl<T: ToTokens> ToTokens for Option<T> {
    fn to_tokens(&self) -> TokenStream {
        match self {
            None => TokenStream::new(),
            Some(s) => s.to_tokens(),
        }
    }
}

impl<T: ToTokens> ToTokens for Box<T> {
    fn to_tokens(&self) -> TokenStream {
        (**self).to_tokens()
    }
}

impl<T: ToTokens> ToTokens for Vec<T> {
    fn to_tokens(&self) -> TokenStream {
        self.iter().flat_map(|t| t.to_tokens()).collect()
    }
}

impl<A: ToTokens, B: ToTokens> ToTokens for (A, B) {
    fn to_tokens(&self) -> TokenStream {
        self.0.to_tokens().chain(self.1.to_tokens()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_create_token_stream() {
        let vec: Vec<Token> = vec![];
        let mut stream = TokenStream::from_iter(vec);
        assert!(stream.next().is_none())
    }

    #[test]
    fn kind_names() {
        assert_eq!(TokenKind::ArithmeticOperator.to_string(), "ARITHMETIC_OPERATOR");
        assert_eq!(TokenKind::LParenthesis.to_string(), "LPARENTHESIS");
        assert_eq!(TokenKind::from_str("RBRACKET").unwrap(), TokenKind::RBracket);
        assert_eq!(TokenKind::from_str("COMMENT_START").unwrap(), TokenKind::CommentStart);
        assert!(TokenKind::from_str("NOT_A_KIND").is_err());
    }

    #[test]
    fn equality_ignores_position() {
        let a = Token::new(TokenKind::Identifier, "x", 3);
        let b = Token::detached(TokenKind::Identifier, "x");
        assert_eq!(a, b);
        assert_ne!(a, Token::detached(TokenKind::Identifier, "y"));
    }

    #[test]
    fn display_escapes_newlines() {
        let token = Token::detached(TokenKind::Comment, " note\n");
        assert_eq!(token.to_string(), "COMMENT( note\\n)");
    }

    #[test]
    fn keyword_check_ignores_case() {
        let token = Token::detached(TokenKind::Keyword, "MULAI");
        assert!(token.is_keyword("mulai"));
        assert!(!token.is_keyword("selesai"));
    }
}
