//! Expressions, from loosest to tightest binding

use super::helpers::Punctuated;
use super::parse_tree::{ParseTreeChild, ParseTreeNode, ToParseTree};
use super::singletons::*;
use crate::parser::{CouldParse, ErrorKind, Expected, Parsable, Result, SyntacticParser};
use pascal_ast::token::{ToTokens, Token, TokenKind, TokenStream};

/// `simple-expression (relational-operator simple-expression)?`
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub left: SimpleExpression,
    pub comparison: Option<(Token, SimpleExpression)>,
}

impl Parsable for Expression {
    const NON_TERMINAL: &'static str = "<expression>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let left = parser.parse()?;
        let comparison = match parser.consume_if(|t| t.kind() == TokenKind::RelationalOperator) {
            Some(op) => Some((op, parser.parse()?)),
            None => None,
        };
        Ok(Self { left, comparison })
    }
}

impl ToTokens for Expression {
    fn to_tokens(&self) -> TokenStream {
        self.left
            .to_tokens()
            .chain(self.comparison.to_tokens())
            .collect()
    }
}

impl ToParseTree for Expression {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL).with(&self.left);
        if let Some((op, right)) = &self.comparison {
            node = node.with(op).with(right);
        }
        node.into()
    }
}

/// `(+|-)? term ((+|-|atau) term)*`
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleExpression {
    pub sign: Option<Token>,
    pub first: Term,
    pub rest: Vec<(Token, Term)>,
}

fn is_sign(token: &Token) -> bool {
    token.is(TokenKind::ArithmeticOperator, "+") || token.is(TokenKind::ArithmeticOperator, "-")
}

fn is_additive(token: &Token) -> bool {
    is_sign(token) || token.is(TokenKind::LogicalOperator, "atau")
}

fn is_multiplicative(token: &Token) -> bool {
    ["*", "/", "bagi", "mod"]
        .iter()
        .any(|op| token.is(TokenKind::ArithmeticOperator, op))
        || token.is(TokenKind::LogicalOperator, "dan")
}

impl Parsable for SimpleExpression {
    const NON_TERMINAL: &'static str = "<simple-expression>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let sign = parser.consume_if(is_sign);
        let first = parser.parse()?;
        let mut rest = vec![];
        while let Some(op) = parser.consume_if(is_additive) {
            rest.push((op, parser.parse()?));
        }
        Ok(Self { sign, first, rest })
    }
}

impl ToTokens for SimpleExpression {
    fn to_tokens(&self) -> TokenStream {
        self.sign
            .to_tokens()
            .chain(self.first.to_tokens())
            .chain(self.rest.to_tokens())
            .collect()
    }
}

impl ToParseTree for SimpleExpression {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL)
            .with_opt(self.sign.as_ref())
            .with(&self.first);
        for (op, term) in &self.rest {
            node = node.with(op).with(term);
        }
        node.into()
    }
}

/// `factor ((*|/|bagi|mod|dan) factor)*`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub first: Factor,
    pub rest: Vec<(Token, Factor)>,
}

impl Parsable for Term {
    const NON_TERMINAL: &'static str = "<term>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let first = parser.parse()?;
        let mut rest = vec![];
        while let Some(op) = parser.consume_if(is_multiplicative) {
            rest.push((op, parser.parse()?));
        }
        Ok(Self { first, rest })
    }
}

impl ToTokens for Term {
    fn to_tokens(&self) -> TokenStream {
        self.first
            .to_tokens()
            .chain(self.rest.to_tokens())
            .collect()
    }
}

impl ToParseTree for Term {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL).with(&self.first);
        for (op, factor) in &self.rest {
            node = node.with(op).with(factor);
        }
        node.into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    Variable(Identifier),
    Call(FunctionCall),
    Index {
        name: Identifier,
        subscript: Subscript,
    },
    Number(Token),
    Char(Token),
    String(Token),
    Parenthesized {
        lparen: LParen,
        expression: Box<Expression>,
        rparen: RParen,
    },
    Not {
        tidak: Not,
        factor: Box<Factor>,
    },
}

impl Parsable for Factor {
    const NON_TERMINAL: &'static str = "<factor>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        if Identifier::could_parse(parser) {
            let next = parser.peek_nth(1).map(Token::kind);
            return match next {
                Some(TokenKind::LParenthesis) => Ok(Factor::Call(parser.parse()?)),
                Some(TokenKind::LBracket) => Ok(Factor::Index {
                    name: parser.parse()?,
                    subscript: parser.parse()?,
                }),
                _ => Ok(Factor::Variable(parser.parse()?)),
            };
        }
        if let Some(number) = parser.consume_if(|t| t.kind() == TokenKind::Number) {
            return Ok(Factor::Number(number));
        }
        if let Some(c) = parser.consume_if(|t| t.kind() == TokenKind::CharLiteral) {
            return Ok(Factor::Char(c));
        }
        if let Some(s) = parser.consume_if(|t| t.kind() == TokenKind::StringLiteral) {
            return Ok(Factor::String(s));
        }
        if LParen::could_parse(parser) {
            return Ok(Factor::Parenthesized {
                lparen: parser.parse()?,
                expression: Box::new(parser.parse()?),
                rparen: parser.parse()?,
            });
        }
        if Not::could_parse(parser) {
            return Ok(Factor::Not {
                tidak: parser.parse()?,
                factor: Box::new(parser.parse()?),
            });
        }
        Err(parser.error(ErrorKind::expected_one_of(
            [
                Expected::kind(TokenKind::Identifier),
                Expected::kind(TokenKind::Number),
                Expected::kind(TokenKind::CharLiteral),
                Expected::kind(TokenKind::StringLiteral),
                Expected::kind(TokenKind::LParenthesis),
                Expected::Token {
                    kind: TokenKind::LogicalOperator,
                    text: Some("tidak"),
                },
            ],
            "factor",
            parser.peek(),
        )))
    }
}

impl ToTokens for Factor {
    fn to_tokens(&self) -> TokenStream {
        match self {
            Factor::Variable(name) => name.to_tokens(),
            Factor::Call(call) => call.to_tokens(),
            Factor::Index { name, subscript } => {
                name.to_tokens().chain(subscript.to_tokens()).collect()
            }
            Factor::Number(t) | Factor::Char(t) | Factor::String(t) => t.to_tokens(),
            Factor::Parenthesized {
                lparen,
                expression,
                rparen,
            } => lparen
                .to_tokens()
                .chain(expression.to_tokens())
                .chain(rparen.to_tokens())
                .collect(),
            Factor::Not { tidak, factor } => tidak.to_tokens().chain(factor.to_tokens()).collect(),
        }
    }
}

impl ToParseTree for Factor {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let node = ParseTreeNode::new(Self::NON_TERMINAL);
        match self {
            Factor::Variable(name) => node.with(name),
            Factor::Call(call) => node.with(call),
            Factor::Index { name, subscript } => node
                .with(name)
                .with_children(subscript.parse_tree_children()),
            Factor::Number(t) | Factor::Char(t) | Factor::String(t) => node.with(t),
            Factor::Parenthesized {
                lparen,
                expression,
                rparen,
            } => node.with(lparen).with(expression).with(rparen),
            Factor::Not { tidak, factor } => node.with(tidak).with(factor),
        }
        .into()
    }
}

/// `[ expression ]` after an array name
#[derive(Debug, Clone, PartialEq)]
pub struct Subscript {
    pub lbracket: LBracket,
    pub index: Box<Expression>,
    pub rbracket: RBracket,
}

impl Subscript {
    /// The brackets and index as siblings, since a subscript has no node of its own
    pub fn parse_tree_children(&self) -> Vec<ParseTreeChild> {
        vec![
            self.lbracket.to_parse_tree(),
            self.index.to_parse_tree(),
            self.rbracket.to_parse_tree(),
        ]
    }
}

impl Parsable for Subscript {
    const NON_TERMINAL: &'static str = "<subscript>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            lbracket: parser.parse()?,
            index: Box::new(parser.parse()?),
            rbracket: parser.parse()?,
        })
    }
}

impl CouldParse for Subscript {
    fn could_parse(parser: &SyntacticParser<'_>) -> bool {
        LBracket::could_parse(parser)
    }
}

impl ToTokens for Subscript {
    fn to_tokens(&self) -> TokenStream {
        self.lbracket
            .to_tokens()
            .chain(self.index.to_tokens())
            .chain(self.rbracket.to_tokens())
            .collect()
    }
}

/// `name ( parameter-list? )` inside an expression
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Identifier,
    pub lparen: LParen,
    pub arguments: Option<ParameterList>,
    pub rparen: RParen,
}

impl Parsable for FunctionCall {
    const NON_TERMINAL: &'static str = "<function-call>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let name = parser.parse()?;
        let lparen = parser.parse()?;
        let arguments = if RParen::could_parse(parser) {
            None
        } else {
            Some(parser.parse()?)
        };
        Ok(Self {
            name,
            lparen,
            arguments,
            rparen: parser.parse()?,
        })
    }
}

impl ToTokens for FunctionCall {
    fn to_tokens(&self) -> TokenStream {
        self.name
            .to_tokens()
            .chain(self.lparen.to_tokens())
            .chain(self.arguments.to_tokens())
            .chain(self.rparen.to_tokens())
            .collect()
    }
}

impl ToParseTree for FunctionCall {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.name)
            .with(&self.lparen)
            .with_opt(self.arguments.as_ref())
            .with(&self.rparen)
            .into()
    }
}

/// Call arguments, `expression (, expression)*`
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList {
    pub arguments: Punctuated<Expression, Comma>,
}

impl ParameterList {
    pub fn arguments(&self) -> impl Iterator<Item = &Expression> {
        self.arguments.items()
    }
}

impl Parsable for ParameterList {
    const NON_TERMINAL: &'static str = "<parameter-list>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let mut arguments = Punctuated::default();
        let mut argument: Expression = parser.parse()?;
        while let Some(comma) = parser.parse_opt::<Comma>()? {
            arguments.punctuated.push((argument, Some(comma)));
            argument = parser.parse()?;
        }
        arguments.punctuated.push((argument, None));
        Ok(Self { arguments })
    }
}

impl ToTokens for ParameterList {
    fn to_tokens(&self) -> TokenStream {
        self.arguments.to_tokens()
    }
}

impl ToParseTree for ParameterList {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with_children(self.arguments.parse_tree_children())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::syntactic_parser::tests::test_parser;
    use test_log::test;

    #[test]
    fn additive_level_holds_atau() {
        test_parser("a atau b dan c", |parser| {
            let expr = parser.parse::<SimpleExpression>().unwrap();
            assert_eq!(expr.rest.len(), 1);
            assert_eq!(expr.rest[0].0.text(), "atau");
            assert_eq!(expr.rest[0].1.rest[0].0.text(), "dan");
        });
    }

    #[test]
    fn relational_is_loosest() {
        test_parser("a + b = c", |parser| {
            let expr = parser.parse::<Expression>().unwrap();
            assert_eq!(expr.left.rest.len(), 1);
            let (op, right) = expr.comparison.unwrap();
            assert_eq!(op.text(), "=");
            assert!(right.rest.is_empty());
        });
    }

    #[test]
    fn identifier_lookahead_in_factor() {
        test_parser("f(1) + a[2] + b", |parser| {
            let expr = parser.parse::<SimpleExpression>().unwrap();
            assert!(matches!(expr.first.first, Factor::Call(_)));
            assert!(matches!(expr.rest[0].1.first, Factor::Index { .. }));
            assert!(matches!(expr.rest[1].1.first, Factor::Variable(_)));
        });
    }

    #[test]
    fn leading_sign() {
        test_parser("-x * 2", |parser| {
            let expr = parser.parse::<SimpleExpression>().unwrap();
            assert_eq!(expr.sign.as_ref().map(|t| t.text()), Some("-"));
            assert_eq!(expr.first.rest.len(), 1);
        });
    }

    #[test]
    fn bad_factor() {
        test_parser("a + ;", |parser| {
            let error = parser.parse::<Expression>().unwrap_err();
            assert_eq!(error.position, 2);
            assert!(error
                .to_string()
                .starts_with("Syntax error at position 2: unexpected token SEMICOLON(;), expected one of IDENTIFIER"));
            assert_eq!(
                error.non_terminal_stack,
                vec!["<expression>", "<simple-expression>", "<term>", "<factor>"]
            );
        });
    }

    #[test]
    fn tokens_round_trip_through_tree() {
        test_parser("tidak (a <= 2) dan f()", |parser| {
            let expr = parser.parse::<Expression>().unwrap();
            let texts: Vec<_> = expr.to_tokens().map(|t| t.text().to_string()).collect();
            assert_eq!(texts, ["tidak", "(", "a", "<=", "2", ")", "dan", "f", "(", ")"]);
        });
    }
}
