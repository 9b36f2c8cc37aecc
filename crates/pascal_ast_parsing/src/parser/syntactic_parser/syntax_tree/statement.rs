use super::expr::{Expression, ParameterList, Subscript};
use super::parse_tree::{ParseTreeChild, ParseTreeNode, ToParseTree};
use super::singletons::*;
use crate::parser::{CouldParse, ErrorKind, Expected, Parsable, Result, SyntacticParser};
use pascal_ast::token::{ToTokens, Token, TokenKind, TokenStream};

/// Builtin procedures that may appear as keywords at the start of a call
pub const BUILTIN_PROCEDURES: [&str; 4] = ["writeln", "write", "readln", "read"];

/// `mulai statement-list selesai`
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStatement {
    pub mulai: KwBegin,
    pub statements: StatementList,
    pub selesai: KwEnd,
}

impl Parsable for CompoundStatement {
    const NON_TERMINAL: &'static str = "<compound-statement>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            mulai: parser.parse()?,
            statements: parser.parse()?,
            selesai: parser.parse()?,
        })
    }
}

impl CouldParse for CompoundStatement {
    fn could_parse(parser: &SyntacticParser<'_>) -> bool {
        KwBegin::could_parse(parser)
    }
}

impl ToTokens for CompoundStatement {
    fn to_tokens(&self) -> TokenStream {
        self.mulai
            .to_tokens()
            .chain(self.statements.to_tokens())
            .chain(self.selesai.to_tokens())
            .collect()
    }
}

impl ToParseTree for CompoundStatement {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.mulai)
            .with(&self.statements)
            .with(&self.selesai)
            .into()
    }
}

/// Statements separated by `;`, ending before `selesai` or `sampai`
#[derive(Debug, Clone, PartialEq)]
pub struct StatementList {
    pub first: Statement,
    /// Each separator and the statement after it, absent when the list ends on a separator
    pub rest: Vec<(Semicolon, Option<Statement>)>,
}

impl StatementList {
    /// Every statement in order, empty ones included
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        std::iter::once(&self.first).chain(self.rest.iter().filter_map(|(_, s)| s.as_ref()))
    }

    fn at_end(parser: &SyntacticParser<'_>) -> bool {
        parser.at_keyword("selesai") || parser.at_keyword("sampai")
    }
}

impl Parsable for StatementList {
    const NON_TERMINAL: &'static str = "<statement-list>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let first = parser.parse()?;
        let mut rest = vec![];
        while let Some(semicolon) = parser.parse_opt::<Semicolon>()? {
            if Self::at_end(parser) {
                rest.push((semicolon, None));
                break;
            }
            rest.push((semicolon, Some(parser.parse()?)));
        }
        let ended = parser.peek().is_none() || Self::at_end(parser) || Semicolon::could_parse(parser);
        if !ended {
            return Err(parser.error(ErrorKind::expected_one_of(
                [
                    Expected::kind(TokenKind::Semicolon),
                    Expected::keyword("selesai"),
                    Expected::keyword("sampai"),
                ],
                "end of statement list",
                parser.peek(),
            )));
        }
        Ok(Self { first, rest })
    }
}

impl ToTokens for StatementList {
    fn to_tokens(&self) -> TokenStream {
        self.first
            .to_tokens()
            .chain(self.rest.iter().flat_map(|(semi, statement)| {
                semi.to_tokens().chain(
                    statement
                        .as_ref()
                        .map(ToTokens::to_tokens)
                        .unwrap_or_default(),
                )
            }))
            .collect()
    }
}

impl ToParseTree for StatementList {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL).with(&self.first);
        for (semicolon, statement) in &self.rest {
            node = node.with(semicolon).with_opt(statement.as_ref());
        }
        node.into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Compound(Box<CompoundStatement>),
    Assignment(AssignmentStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Repeat(Box<RepeatStatement>),
    Call(ProcedureCall),
    /// Anything that doesn't start a statement, consumes nothing
    Empty,
}

impl Parsable for Statement {
    const NON_TERMINAL: &'static str = "<statement>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let statement = if CompoundStatement::could_parse(parser) {
            Statement::Compound(Box::new(parser.parse()?))
        } else if KwIf::could_parse(parser) {
            Statement::If(parser.parse()?)
        } else if KwWhile::could_parse(parser) {
            Statement::While(parser.parse()?)
        } else if KwFor::could_parse(parser) {
            Statement::For(parser.parse()?)
        } else if KwRepeat::could_parse(parser) {
            Statement::Repeat(Box::new(parser.parse()?))
        } else if Identifier::could_parse(parser) {
            let assigns = parser.peek_nth(1).is_some_and(|next| {
                matches!(
                    next.kind(),
                    TokenKind::AssignOperator | TokenKind::LBracket
                )
            });
            if assigns {
                Statement::Assignment(parser.parse()?)
            } else {
                Statement::Call(parser.parse()?)
            }
        } else if ProcedureCall::is_builtin_keyword(parser) {
            Statement::Call(parser.parse()?)
        } else {
            Statement::Empty
        };
        Ok(statement)
    }
}

impl ToTokens for Statement {
    fn to_tokens(&self) -> TokenStream {
        match self {
            Statement::Compound(s) => s.to_tokens(),
            Statement::Assignment(s) => s.to_tokens(),
            Statement::If(s) => s.to_tokens(),
            Statement::While(s) => s.to_tokens(),
            Statement::For(s) => s.to_tokens(),
            Statement::Repeat(s) => s.to_tokens(),
            Statement::Call(s) => s.to_tokens(),
            Statement::Empty => TokenStream::new(),
        }
    }
}

impl ToParseTree for Statement {
    fn to_parse_tree(&self) -> ParseTreeChild {
        match self {
            Statement::Compound(s) => s.to_parse_tree(),
            Statement::Assignment(s) => s.to_parse_tree(),
            Statement::If(s) => s.to_parse_tree(),
            Statement::While(s) => s.to_parse_tree(),
            Statement::For(s) => s.to_parse_tree(),
            Statement::Repeat(s) => s.to_parse_tree(),
            Statement::Call(s) => s.to_parse_tree(),
            Statement::Empty => ParseTreeNode::new("<empty-statement>").into(),
        }
    }
}

/// `name ([ index ])? := value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    pub target: Identifier,
    pub index: Option<Subscript>,
    pub assign: Assign,
    pub value: Expression,
}

impl Parsable for AssignmentStatement {
    const NON_TERMINAL: &'static str = "<assignment-statement>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            target: parser.parse()?,
            index: parser.parse_opt()?,
            assign: parser.parse()?,
            value: parser.parse()?,
        })
    }
}

impl ToTokens for AssignmentStatement {
    fn to_tokens(&self) -> TokenStream {
        self.target
            .to_tokens()
            .chain(self.index.to_tokens())
            .chain(self.assign.to_tokens())
            .chain(self.value.to_tokens())
            .collect()
    }
}

impl ToParseTree for AssignmentStatement {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL).with(&self.target);
        if let Some(index) = &self.index {
            node = node.with_children(index.parse_tree_children());
        }
        node.with(&self.assign).with(&self.value).into()
    }
}

/// `jika condition maka statement (selain-itu statement)?`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub jika: KwIf,
    pub condition: Expression,
    pub maka: KwThen,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<(KwElse, Box<Statement>)>,
}

impl Parsable for IfStatement {
    const NON_TERMINAL: &'static str = "<if-statement>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let jika = parser.parse()?;
        let condition = parser.parse()?;
        let maka = parser.parse()?;
        let then_branch = Box::new(parser.parse()?);
        let else_branch = match parser.parse_opt::<KwElse>()? {
            Some(selain_itu) => Some((selain_itu, Box::new(parser.parse()?))),
            None => None,
        };
        Ok(Self {
            jika,
            condition,
            maka,
            then_branch,
            else_branch,
        })
    }
}

impl ToTokens for IfStatement {
    fn to_tokens(&self) -> TokenStream {
        self.jika
            .to_tokens()
            .chain(self.condition.to_tokens())
            .chain(self.maka.to_tokens())
            .chain(self.then_branch.to_tokens())
            .chain(self.else_branch.to_tokens())
            .collect()
    }
}

impl ToParseTree for IfStatement {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.jika)
            .with(&self.condition)
            .with(&self.maka)
            .with(&self.then_branch);
        if let Some((selain_itu, statement)) = &self.else_branch {
            node = node.with(selain_itu).with(statement);
        }
        node.into()
    }
}

/// `selama condition lakukan statement`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub selama: KwWhile,
    pub condition: Expression,
    pub lakukan: KwDo,
    pub body: Box<Statement>,
}

impl Parsable for WhileStatement {
    const NON_TERMINAL: &'static str = "<while-statement>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            selama: parser.parse()?,
            condition: parser.parse()?,
            lakukan: parser.parse()?,
            body: Box::new(parser.parse()?),
        })
    }
}

impl ToTokens for WhileStatement {
    fn to_tokens(&self) -> TokenStream {
        self.selama
            .to_tokens()
            .chain(self.condition.to_tokens())
            .chain(self.lakukan.to_tokens())
            .chain(self.body.to_tokens())
            .collect()
    }
}

impl ToParseTree for WhileStatement {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.selama)
            .with(&self.condition)
            .with(&self.lakukan)
            .with(&self.body)
            .into()
    }
}

/// `untuk name := start (ke | turun-ke) end lakukan statement`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub untuk: KwFor,
    pub variable: Identifier,
    pub assign: Assign,
    pub start: Expression,
    /// The `ke` or `turun-ke` keyword
    pub direction: Token,
    pub end: Expression,
    pub lakukan: KwDo,
    pub body: Box<Statement>,
}

impl ForStatement {
    /// Whether the loop counts down
    pub fn is_downto(&self) -> bool {
        self.direction.is_keyword("turun-ke")
    }
}

impl Parsable for ForStatement {
    const NON_TERMINAL: &'static str = "<for-statement>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let untuk = parser.parse()?;
        let variable = parser.parse()?;
        let assign = parser.parse()?;
        let start = parser.parse()?;
        let direction = parser
            .consume_if(|t| t.is_keyword("ke") || t.is_keyword("turun-ke"))
            .ok_or_else(|| {
                parser.error(ErrorKind::expected_one_of(
                    [Expected::keyword("ke"), Expected::keyword("turun-ke")],
                    "loop direction",
                    parser.peek(),
                ))
            })?;
        Ok(Self {
            untuk,
            variable,
            assign,
            start,
            direction,
            end: parser.parse()?,
            lakukan: parser.parse()?,
            body: Box::new(parser.parse()?),
        })
    }
}

impl ToTokens for ForStatement {
    fn to_tokens(&self) -> TokenStream {
        self.untuk
            .to_tokens()
            .chain(self.variable.to_tokens())
            .chain(self.assign.to_tokens())
            .chain(self.start.to_tokens())
            .chain(self.direction.to_tokens())
            .chain(self.end.to_tokens())
            .chain(self.lakukan.to_tokens())
            .chain(self.body.to_tokens())
            .collect()
    }
}

impl ToParseTree for ForStatement {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.untuk)
            .with(&self.variable)
            .with(&self.assign)
            .with(&self.start)
            .with(&self.direction)
            .with(&self.end)
            .with(&self.lakukan)
            .with(&self.body)
            .into()
    }
}

/// `ulangi statement-list sampai condition`
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    pub ulangi: KwRepeat,
    pub body: StatementList,
    pub sampai: KwUntil,
    pub condition: Expression,
}

impl Parsable for RepeatStatement {
    const NON_TERMINAL: &'static str = "<repeat-statement>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            ulangi: parser.parse()?,
            body: parser.parse()?,
            sampai: parser.parse()?,
            condition: parser.parse()?,
        })
    }
}

impl ToTokens for RepeatStatement {
    fn to_tokens(&self) -> TokenStream {
        self.ulangi
            .to_tokens()
            .chain(self.body.to_tokens())
            .chain(self.sampai.to_tokens())
            .chain(self.condition.to_tokens())
            .collect()
    }
}

impl ToParseTree for RepeatStatement {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.ulangi)
            .with(&self.body)
            .with(&self.sampai)
            .with(&self.condition)
            .into()
    }
}

/// `name ( parameter-list? )` used as a statement
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    /// An identifier, or a builtin procedure lexed as a keyword
    pub name: Token,
    pub lparen: LParen,
    pub arguments: Option<ParameterList>,
    pub rparen: RParen,
}

impl ProcedureCall {
    fn is_builtin_keyword(parser: &SyntacticParser<'_>) -> bool {
        BUILTIN_PROCEDURES
            .iter()
            .any(|builtin| parser.at_keyword(builtin))
    }
}

impl Parsable for ProcedureCall {
    const NON_TERMINAL: &'static str = "<procedure/function-call>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let name = if Self::is_builtin_keyword(parser) {
            parser.expect(TokenKind::Keyword)?
        } else {
            parser.expect(TokenKind::Identifier)?
        };
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

impl ToTokens for ProcedureCall {
    fn to_tokens(&self) -> TokenStream {
        self.name
            .to_tokens()
            .chain(self.lparen.to_tokens())
            .chain(self.arguments.to_tokens())
            .chain(self.rparen.to_tokens())
            .collect()
    }
}

impl ToParseTree for ProcedureCall {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.name)
            .with(&self.lparen)
            .with_opt(self.arguments.as_ref())
            .with(&self.rparen)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::syntactic_parser::tests::test_parser;
    use test_log::test;

    #[test]
    fn identifier_then_assign_is_assignment() {
        test_parser("x := 1", |parser| {
            let statement = parser.parse::<Statement>().unwrap();
            assert!(matches!(statement, Statement::Assignment(_)));
        });
        test_parser("a[2] := 1", |parser| {
            let Statement::Assignment(assignment) = parser.parse::<Statement>().unwrap() else {
                panic!("expected assignment")
            };
            assert!(assignment.index.is_some());
        });
    }

    #[test]
    fn identifier_then_paren_is_call() {
        test_parser("writeln('hi', x)", |parser| {
            let Statement::Call(call) = parser.parse::<Statement>().unwrap() else {
                panic!("expected call")
            };
            assert_eq!(call.name.text(), "writeln");
            assert_eq!(call.arguments.map(|a| a.arguments.len()), Some(2));
        });
    }

    #[test]
    fn anything_else_is_empty() {
        test_parser("selesai", |parser| {
            assert_eq!(parser.parse::<Statement>().unwrap(), Statement::Empty);
            assert_eq!(parser.position(), 0);
        });
    }

    #[test]
    fn statement_list_allows_trailing_separator() {
        test_parser("x := 1; y := 2; selesai", |parser| {
            let list = parser.parse::<StatementList>().unwrap();
            assert_eq!(list.rest.len(), 2);
            assert!(list.rest[1].1.is_none());
            assert_eq!(list.statements().count(), 2);
        });
    }

    #[test]
    fn statement_list_must_end_properly() {
        test_parser("x := 1 y := 2", |parser| {
            let error = parser.parse::<StatementList>().unwrap_err();
            assert_eq!(
                error.to_string(),
                "Syntax error at position 3: unexpected token IDENTIFIER(y), expected one of SEMICOLON(;), KEYWORD(selesai), KEYWORD(sampai)"
            );
        });
    }

    #[test]
    fn for_requires_direction() {
        test_parser("untuk i := 1 sampai 10 lakukan x := i", |parser| {
            let error = parser.parse::<ForStatement>().unwrap_err();
            assert!(error.to_string().contains("expected one of KEYWORD(ke), KEYWORD(turun-ke)"));
        });
        test_parser("untuk i := 10 turun-ke 1 lakukan x := i", |parser| {
            assert!(parser.parse::<ForStatement>().unwrap().is_downto());
        });
    }

    #[test]
    fn dangling_else_binds_to_nearest_if() {
        test_parser("jika a maka jika b maka x := 1 selain-itu x := 2", |parser| {
            let outer = parser.parse::<IfStatement>().unwrap();
            assert!(outer.else_branch.is_none());
            let Statement::If(inner) = *outer.then_branch else {
                panic!("expected nested if")
            };
            assert!(inner.else_branch.is_some());
        });
    }
}
