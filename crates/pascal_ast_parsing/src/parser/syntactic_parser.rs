use log::{debug, trace};
use pascal_ast::token::{Token, TokenKind};

pub mod error;
pub mod syntax_tree;

pub use error::*;

/// Parse a syntax tree part
pub trait Parsable: Sized {
    /// The grammar label of this part, recorded on the non-terminal stack while it's parsed
    const NON_TERMINAL: &'static str;

    /// Attempt to parse some syntax tree part
    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self>;
}

/// A sub trait that determines if this type could be parsed without doing the parsing
pub trait CouldParse: Parsable {
    /// Checks whether the next token begins this part
    fn could_parse(parser: &SyntacticParser<'_>) -> bool;
}

/// Creates the typed parse tree from a token sequence.
///
/// Comment tokens are skipped, but positions reported in errors are indices into the full
/// sequence.
#[derive(Debug)]
pub struct SyntacticParser<'t> {
    tokens: &'t [Token],
    significant: Vec<usize>,
    cursor: usize,
    non_terminals: Vec<&'static str>,
}

impl<'t> SyntacticParser<'t> {
    /// Creates a new parser over some tokens
    pub fn new(tokens: &'t [Token]) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.kind().is_trivia())
            .map(|(index, _)| index)
            .collect();
        Self {
            tokens,
            significant,
            cursor: 0,
            non_terminals: vec![],
        }
    }

    /// peek the current lookahead
    pub fn peek(&self) -> Option<&'t Token> {
        self.peek_nth(0)
    }

    /// peek `n` tokens past the current lookahead
    pub fn peek_nth(&self, n: usize) -> Option<&'t Token> {
        self.significant
            .get(self.cursor + n)
            .map(|&index| &self.tokens[index])
    }

    /// Index of the lookahead in the full token sequence, or its length at the end of input
    pub fn position(&self) -> usize {
        self.significant
            .get(self.cursor)
            .copied()
            .unwrap_or(self.tokens.len())
    }

    /// Whether every significant token was consumed
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.significant.len()
    }

    pub fn consume(&mut self) -> Option<Token> {
        let token = self.peek()?.clone();
        self.cursor += 1;
        trace!("consumed {token:?}");
        Some(token)
    }

    /// consumes if predicate matches
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<Token>
    where
        F: FnOnce(&Token) -> bool,
    {
        if self.peek().is_some_and(predicate) {
            self.consume()
        } else {
            None
        }
    }

    /// Checks the lookahead's kind
    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind() == kind)
    }

    /// Checks the lookahead's kind and, ignoring case, its text
    pub fn at_text(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is_some_and(|t| t.is(kind, text))
    }

    pub fn at_keyword(&self, keyword: &str) -> bool {
        self.at_text(TokenKind::Keyword, keyword)
    }

    /// Consumes a token of the given kind, or fails
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        match self.consume_if(|t| t.kind() == kind) {
            Some(token) => Ok(token),
            None => Err(self.error(ErrorKind::expected(Expected::kind(kind), self.peek()))),
        }
    }

    /// Consumes a token of the given kind with the given text, or fails
    pub fn expect_text(&mut self, kind: TokenKind, text: &'static str) -> Result<Token> {
        match self.consume_if(|t| t.is(kind, text)) {
            Some(token) => Ok(token),
            None => {
                let expected = Expected::Token {
                    kind,
                    text: Some(text),
                };
                Err(self.error(ErrorKind::expected(expected, self.peek())))
            }
        }
    }

    pub fn expect_keyword(&mut self, keyword: &'static str) -> Result<Token> {
        self.expect_text(TokenKind::Keyword, keyword)
    }

    /// Wrapper function for parsing an item
    #[inline]
    pub fn parse<P: Parsable>(&mut self) -> Result<P> {
        trace!("starting parsing {} at {:?}", P::NON_TERMINAL, self.peek());
        self.non_terminals.push(P::NON_TERMINAL);
        let r = P::parse(self);
        if r.is_ok() {
            self.non_terminals.pop();
        }
        trace!("after parsing {} at {:?}", P::NON_TERMINAL, self.peek());
        r
    }

    /// Wrapper function for parsing an optional item
    pub fn parse_opt<P: CouldParse>(&mut self) -> Result<Option<P>> {
        if P::could_parse(self) {
            Ok(Some(self.parse::<P>()?))
        } else {
            Ok(None)
        }
    }

    /// Parses items for as long as the lookahead begins one
    pub fn parse_while<P: CouldParse>(&mut self) -> Result<Vec<P>> {
        let mut items = vec![];
        while P::could_parse(self) {
            items.push(self.parse::<P>()?);
        }
        Ok(items)
    }

    /// Creates an error at the lookahead
    pub fn error(&self, kind: ErrorKind) -> SyntaxError {
        debug!("syntax error: {kind}");
        SyntaxError::new(kind, self.position(), self.non_terminals.clone())
    }
}

/// Parses a whole program from a token sequence. Tokens after the final `.` are ignored.
pub fn parse(tokens: &[Token]) -> Result<syntax_tree::Program> {
    let mut parser = SyntacticParser::new(tokens);
    let program = parser.parse::<syntax_tree::Program>()?;
    if !parser.is_finished() {
        debug!(
            "ignoring tokens after the end of the program, starting at position {}",
            parser.position()
        );
    }
    Ok(program)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::lexer::{tokenize, RuleSet};
    use test_log::test;

    pub fn test_parser<F>(s: &str, callback: F)
    where
        F: FnOnce(&mut SyntacticParser<'_>),
    {
        let rules = RuleSet::builtin().expect("builtin rules");
        let tokens = tokenize(s, &rules).expect("could not lex");
        let mut parser = SyntacticParser::new(&tokens);
        callback(&mut parser)
    }

    #[test]
    fn peek_skips_comments() {
        test_parser("{ a } x { b } := 1", |parser| {
            assert_eq!(parser.position(), 3);
            assert_eq!(parser.peek().map(|t| t.text()), Some("x"));
            assert_eq!(parser.peek_nth(1).map(|t| t.text()), Some(":="));
            parser.expect(TokenKind::Identifier).unwrap();
            assert_eq!(parser.position(), 7);
        });
    }

    #[test]
    fn expect_reports_position_and_expected() {
        test_parser("x y", |parser| {
            parser.expect(TokenKind::Identifier).unwrap();
            let error = parser.expect(TokenKind::Semicolon).unwrap_err();
            assert_eq!(
                error.to_string(),
                "Syntax error at position 1: unexpected token IDENTIFIER(y), expected SEMICOLON(;)"
            );
        });
    }

    #[test]
    fn expect_at_end_of_input() {
        test_parser("", |parser| {
            let error = parser.expect_keyword("mulai").unwrap_err();
            assert_eq!(
                error.to_string(),
                "Syntax error at position 0: Expected KEYWORD(mulai), but reached end of input"
            );
        });
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let rules = RuleSet::builtin().unwrap();
        let tokens = tokenize("program p; mulai selesai. x y z", &rules).unwrap();
        assert!(parse(&tokens).is_ok());
    }
}
