//! The program, its declarations and types

use super::expr::Expression;
use super::helpers::Punctuated;
use super::parse_tree::{ParseTreeChild, ParseTreeNode, ToParseTree};
use super::singletons::*;
use super::statement::CompoundStatement;
use crate::parser::{CouldParse, ErrorKind, Expected, Parsable, Result, SyntacticParser};
use pascal_ast::token::{ToTokens, Token, TokenKind, TokenStream};

/// Type names that are keywords
pub const PRIMITIVE_TYPES: [&str; 5] = ["integer", "real", "boolean", "char", "string"];

/// `program-header declaration-part compound-statement .`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub header: ProgramHeader,
    pub declarations: DeclarationPart,
    pub body: CompoundStatement,
    pub dot: Dot,
}

impl Parsable for Program {
    const NON_TERMINAL: &'static str = "<program>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            header: parser.parse()?,
            declarations: parser.parse()?,
            body: parser.parse()?,
            dot: parser.parse()?,
        })
    }
}

impl ToTokens for Program {
    fn to_tokens(&self) -> TokenStream {
        self.header
            .to_tokens()
            .chain(self.declarations.to_tokens())
            .chain(self.body.to_tokens())
            .chain(self.dot.to_tokens())
            .collect()
    }
}

impl ToParseTree for Program {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.header)
            .with(&self.declarations)
            .with(&self.body)
            .with(&self.dot)
            .into()
    }
}

impl Program {
    /// The labelled parse tree rooted at `<program>`
    pub fn parse_tree(&self) -> ParseTreeNode {
        match self.to_parse_tree() {
            ParseTreeChild::Node(node) => node,
            ParseTreeChild::Token(token) => ParseTreeNode::new(Self::NON_TERMINAL).with(&token),
        }
    }
}

/// `program name ;`
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramHeader {
    pub program: KwProgram,
    pub name: Identifier,
    pub semicolon: Semicolon,
}

impl Parsable for ProgramHeader {
    const NON_TERMINAL: &'static str = "<program-header>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            program: parser.parse()?,
            name: parser.parse()?,
            semicolon: parser.parse()?,
        })
    }
}

impl ToTokens for ProgramHeader {
    fn to_tokens(&self) -> TokenStream {
        self.program
            .to_tokens()
            .chain(self.name.to_tokens())
            .chain(self.semicolon.to_tokens())
            .collect()
    }
}

impl ToParseTree for ProgramHeader {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.program)
            .with(&self.name)
            .with(&self.semicolon)
            .into()
    }
}

/// Constant, type, variable and subprogram declarations, each section repeatable, in that order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclarationPart {
    pub constants: Vec<ConstDeclaration>,
    pub types: Vec<TypeDeclaration>,
    pub variables: Vec<VarDeclaration>,
    pub subprograms: Vec<SubprogramDeclaration>,
}

impl Parsable for DeclarationPart {
    const NON_TERMINAL: &'static str = "<declaration-part>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            constants: parser.parse_while()?,
            types: parser.parse_while()?,
            variables: parser.parse_while()?,
            subprograms: parser.parse_while()?,
        })
    }
}

impl ToTokens for DeclarationPart {
    fn to_tokens(&self) -> TokenStream {
        self.constants
            .to_tokens()
            .chain(self.types.to_tokens())
            .chain(self.variables.to_tokens())
            .chain(self.subprograms.to_tokens())
            .collect()
    }
}

impl ToParseTree for DeclarationPart {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with_all(&self.constants)
            .with_all(&self.types)
            .with_all(&self.variables)
            .with_all(&self.subprograms)
            .into()
    }
}

/// `konstanta (name = value ;)+`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDeclaration {
    pub konstanta: KwConst,
    pub definitions: Vec<ConstDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDefinition {
    pub name: Identifier,
    pub equals: Equals,
    /// A number, char, string or identifier token
    pub value: Token,
    pub semicolon: Semicolon,
}

impl Parsable for ConstDeclaration {
    const NON_TERMINAL: &'static str = "<const-declaration>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let konstanta = parser.parse()?;
        let mut definitions = vec![];
        loop {
            let name = parser.parse()?;
            let equals = parser.parse()?;
            let value = match parser.consume_if(|t| {
                matches!(
                    t.kind(),
                    TokenKind::Number
                        | TokenKind::CharLiteral
                        | TokenKind::StringLiteral
                        | TokenKind::Identifier
                )
            }) {
                Some(value) => value,
                None => {
                    return Err(parser.error(ErrorKind::expected_one_of(
                        [
                            Expected::kind(TokenKind::Number),
                            Expected::kind(TokenKind::CharLiteral),
                            Expected::kind(TokenKind::StringLiteral),
                            Expected::kind(TokenKind::Identifier),
                        ],
                        "constant value",
                        parser.peek(),
                    )))
                }
            };
            let semicolon = parser.parse()?;
            definitions.push(ConstDefinition {
                name,
                equals,
                value,
                semicolon,
            });
            if !Identifier::could_parse(parser) {
                break;
            }
        }
        Ok(Self {
            konstanta,
            definitions,
        })
    }
}

impl CouldParse for ConstDeclaration {
    fn could_parse(parser: &SyntacticParser<'_>) -> bool {
        KwConst::could_parse(parser)
    }
}

impl ToTokens for ConstDeclaration {
    fn to_tokens(&self) -> TokenStream {
        self.konstanta
            .to_tokens()
            .chain(self.definitions.iter().flat_map(|d| {
                d.name
                    .to_tokens()
                    .chain(d.equals.to_tokens())
                    .chain(d.value.to_tokens())
                    .chain(d.semicolon.to_tokens())
            }))
            .collect()
    }
}

impl ToParseTree for ConstDeclaration {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL).with(&self.konstanta);
        for definition in &self.definitions {
            node = node
                .with(&definition.name)
                .with(&definition.equals)
                .with(&definition.value)
                .with(&definition.semicolon);
        }
        node.into()
    }
}

/// `tipe (name = type ;)+`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub tipe: KwType,
    pub definitions: Vec<TypeDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: Identifier,
    pub equals: Equals,
    pub ty: Type,
    pub semicolon: Semicolon,
}

impl Parsable for TypeDeclaration {
    const NON_TERMINAL: &'static str = "<type-declaration>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let tipe = parser.parse()?;
        let mut definitions = vec![];
        loop {
            definitions.push(TypeDefinition {
                name: parser.parse()?,
                equals: parser.parse()?,
                ty: parser.parse()?,
                semicolon: parser.parse()?,
            });
            if !Identifier::could_parse(parser) {
                break;
            }
        }
        Ok(Self { tipe, definitions })
    }
}

impl CouldParse for TypeDeclaration {
    fn could_parse(parser: &SyntacticParser<'_>) -> bool {
        KwType::could_parse(parser)
    }
}

impl ToTokens for TypeDeclaration {
    fn to_tokens(&self) -> TokenStream {
        self.tipe
            .to_tokens()
            .chain(self.definitions.iter().flat_map(|d| {
                d.name
                    .to_tokens()
                    .chain(d.equals.to_tokens())
                    .chain(d.ty.to_tokens())
                    .chain(d.semicolon.to_tokens())
            }))
            .collect()
    }
}

impl ToParseTree for TypeDeclaration {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL).with(&self.tipe);
        for definition in &self.definitions {
            node = node
                .with(&definition.name)
                .with(&definition.equals)
                .with(&definition.ty)
                .with(&definition.semicolon);
        }
        node.into()
    }
}

/// `variabel (identifier-list : type ;)+`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub variabel: KwVar,
    pub groups: Vec<VarGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarGroup {
    pub names: IdentifierList,
    pub colon: Colon,
    pub ty: Type,
    pub semicolon: Semicolon,
}

impl Parsable for VarDeclaration {
    const NON_TERMINAL: &'static str = "<var-declaration>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let variabel = parser.parse()?;
        let mut groups = vec![];
        loop {
            groups.push(VarGroup {
                names: parser.parse()?,
                colon: parser.parse()?,
                ty: parser.parse()?,
                semicolon: parser.parse()?,
            });
            if !Identifier::could_parse(parser) {
                break;
            }
        }
        Ok(Self { variabel, groups })
    }
}

impl CouldParse for VarDeclaration {
    fn could_parse(parser: &SyntacticParser<'_>) -> bool {
        KwVar::could_parse(parser)
    }
}

impl ToTokens for VarDeclaration {
    fn to_tokens(&self) -> TokenStream {
        self.variabel
            .to_tokens()
            .chain(self.groups.iter().flat_map(|g| {
                g.names
                    .to_tokens()
                    .chain(g.colon.to_tokens())
                    .chain(g.ty.to_tokens())
                    .chain(g.semicolon.to_tokens())
            }))
            .collect()
    }
}

impl ToParseTree for VarDeclaration {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let mut node = ParseTreeNode::new(Self::NON_TERMINAL).with(&self.variabel);
        for group in &self.groups {
            node = node
                .with(&group.names)
                .with(&group.colon)
                .with(&group.ty)
                .with(&group.semicolon);
        }
        node.into()
    }
}

/// `name (, name)*`
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierList {
    pub names: Punctuated<Identifier, Comma>,
}

impl IdentifierList {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.items().map(Identifier::name)
    }
}

impl Parsable for IdentifierList {
    const NON_TERMINAL: &'static str = "<identifier-list>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let mut names = Punctuated::default();
        let mut name: Identifier = parser.parse()?;
        while let Some(comma) = parser.parse_opt::<Comma>()? {
            names.punctuated.push((name, Some(comma)));
            name = parser.parse()?;
        }
        names.punctuated.push((name, None));
        Ok(Self { names })
    }
}

impl ToTokens for IdentifierList {
    fn to_tokens(&self) -> TokenStream {
        self.names.to_tokens()
    }
}

impl ToParseTree for IdentifierList {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with_children(self.names.parse_tree_children())
            .into()
    }
}

/// A type in a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Array(ArrayType),
    /// One of [PRIMITIVE_TYPES]
    Primitive(Token),
    Named(Identifier),
    Range(Range),
}

impl Parsable for Type {
    const NON_TERMINAL: &'static str = "<type>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        if KwArray::could_parse(parser) {
            return Ok(Type::Array(parser.parse()?));
        }
        if let Some(primitive) = parser.consume_if(|t| {
            t.kind() == TokenKind::Keyword
                && PRIMITIVE_TYPES.iter().any(|p| t.text().eq_ignore_ascii_case(p))
        }) {
            return Ok(Type::Primitive(primitive));
        }
        if let Some(name) = parser.parse_opt::<Identifier>()? {
            return Ok(Type::Named(name));
        }
        let starts_range = parser.peek().is_some_and(|t| {
            matches!(t.kind(), TokenKind::Number | TokenKind::CharLiteral)
                || t.is(TokenKind::ArithmeticOperator, "-")
                || t.is(TokenKind::ArithmeticOperator, "+")
        });
        if starts_range {
            return Ok(Type::Range(parser.parse()?));
        }
        let expected = PRIMITIVE_TYPES
            .into_iter()
            .map(Expected::keyword)
            .chain([
                Expected::keyword("larik"),
                Expected::kind(TokenKind::Identifier),
                Expected::Production(Range::NON_TERMINAL),
            ]);
        Err(parser.error(ErrorKind::expected_one_of(expected, "type", parser.peek())))
    }
}

impl ToTokens for Type {
    fn to_tokens(&self) -> TokenStream {
        match self {
            Type::Array(a) => a.to_tokens(),
            Type::Primitive(t) => t.to_tokens(),
            Type::Named(n) => n.to_tokens(),
            Type::Range(r) => r.to_tokens(),
        }
    }
}

impl ToParseTree for Type {
    fn to_parse_tree(&self) -> ParseTreeChild {
        let node = ParseTreeNode::new(Self::NON_TERMINAL);
        match self {
            Type::Array(a) => node.with(a),
            Type::Primitive(t) => node.with(t),
            Type::Named(n) => node.with(n),
            Type::Range(r) => node.with(r),
        }
        .into()
    }
}

/// `larik [ range ] dari type`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub larik: KwArray,
    pub lbracket: LBracket,
    pub range: Range,
    pub rbracket: RBracket,
    pub dari: KwOf,
    pub element: Box<Type>,
}

impl Parsable for ArrayType {
    const NON_TERMINAL: &'static str = "<array-type>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            larik: parser.parse()?,
            lbracket: parser.parse()?,
            range: parser.parse()?,
            rbracket: parser.parse()?,
            dari: parser.parse()?,
            element: Box::new(parser.parse()?),
        })
    }
}

impl ToTokens for ArrayType {
    fn to_tokens(&self) -> TokenStream {
        self.larik
            .to_tokens()
            .chain(self.lbracket.to_tokens())
            .chain(self.range.to_tokens())
            .chain(self.rbracket.to_tokens())
            .chain(self.dari.to_tokens())
            .chain(self.element.to_tokens())
            .collect()
    }
}

impl ToParseTree for ArrayType {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.larik)
            .with(&self.lbracket)
            .with(&self.range)
            .with(&self.rbracket)
            .with(&self.dari)
            .with(&self.element)
            .into()
    }
}

/// `expression .. expression`
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub start: Expression,
    pub range_op: RangeOp,
    pub end: Expression,
}

impl Parsable for Range {
    const NON_TERMINAL: &'static str = "<range>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            start: parser.parse()?,
            range_op: parser.parse()?,
            end: parser.parse()?,
        })
    }
}

impl ToTokens for Range {
    fn to_tokens(&self) -> TokenStream {
        self.start
            .to_tokens()
            .chain(self.range_op.to_tokens())
            .chain(self.end.to_tokens())
            .collect()
    }
}

impl ToParseTree for Range {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.start)
            .with(&self.range_op)
            .with(&self.end)
            .into()
    }
}

/// A procedure or function declaration
#[derive(Debug, Clone, PartialEq)]
pub enum SubprogramDeclaration {
    Procedure(ProcedureDeclaration),
    Function(FunctionDeclaration),
}

impl Parsable for SubprogramDeclaration {
    const NON_TERMINAL: &'static str = "<subprogram-declaration>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        if KwProcedure::could_parse(parser) {
            Ok(SubprogramDeclaration::Procedure(parser.parse()?))
        } else if KwFunction::could_parse(parser) {
            Ok(SubprogramDeclaration::Function(parser.parse()?))
        } else {
            Err(parser.error(ErrorKind::expected_one_of(
                [Expected::keyword("prosedur"), Expected::keyword("fungsi")],
                "procedure or function",
                parser.peek(),
            )))
        }
    }
}

impl CouldParse for SubprogramDeclaration {
    fn could_parse(parser: &SyntacticParser<'_>) -> bool {
        KwProcedure::could_parse(parser) || KwFunction::could_parse(parser)
    }
}

impl ToTokens for SubprogramDeclaration {
    fn to_tokens(&self) -> TokenStream {
        match self {
            SubprogramDeclaration::Procedure(p) => p.to_tokens(),
            SubprogramDeclaration::Function(f) => f.to_tokens(),
        }
    }
}

impl ToParseTree for SubprogramDeclaration {
    fn to_parse_tree(&self) -> ParseTreeChild {
        match self {
            SubprogramDeclaration::Procedure(p) => p.to_parse_tree(),
            SubprogramDeclaration::Function(f) => f.to_parse_tree(),
        }
    }
}

/// `prosedur name formal-parameter-list? ; block ;`
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDeclaration {
    pub prosedur: KwProcedure,
    pub name: Identifier,
    pub parameters: Option<FormalParameterList>,
    pub semicolon: Semicolon,
    pub block: Block,
    pub end_semicolon: Semicolon,
}

impl Parsable for ProcedureDeclaration {
    const NON_TERMINAL: &'static str = "<procedure-declaration>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            prosedur: parser.parse()?,
            name: parser.parse()?,
            parameters: parser.parse_opt()?,
            semicolon: parser.parse()?,
            block: parser.parse()?,
            end_semicolon: parser.parse()?,
        })
    }
}

impl ToTokens for ProcedureDeclaration {
    fn to_tokens(&self) -> TokenStream {
        self.prosedur
            .to_tokens()
            .chain(self.name.to_tokens())
            .chain(self.parameters.to_tokens())
            .chain(self.semicolon.to_tokens())
            .chain(self.block.to_tokens())
            .chain(self.end_semicolon.to_tokens())
            .collect()
    }
}

impl ToParseTree for ProcedureDeclaration {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.prosedur)
            .with(&self.name)
            .with_opt(self.parameters.as_ref())
            .with(&self.semicolon)
            .with(&self.block)
            .with(&self.end_semicolon)
            .into()
    }
}

/// `fungsi name formal-parameter-list? : type ; block ;`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub fungsi: KwFunction,
    pub name: Identifier,
    pub parameters: Option<FormalParameterList>,
    pub colon: Colon,
    pub return_type: Type,
    pub semicolon: Semicolon,
    pub block: Block,
    pub end_semicolon: Semicolon,
}

impl Parsable for FunctionDeclaration {
    const NON_TERMINAL: &'static str = "<function-declaration>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            fungsi: parser.parse()?,
            name: parser.parse()?,
            parameters: parser.parse_opt()?,
            colon: parser.parse()?,
            return_type: parser.parse()?,
            semicolon: parser.parse()?,
            block: parser.parse()?,
            end_semicolon: parser.parse()?,
        })
    }
}

impl ToTokens for FunctionDeclaration {
    fn to_tokens(&self) -> TokenStream {
        self.fungsi
            .to_tokens()
            .chain(self.name.to_tokens())
            .chain(self.parameters.to_tokens())
            .chain(self.colon.to_tokens())
            .chain(self.return_type.to_tokens())
            .chain(self.semicolon.to_tokens())
            .chain(self.block.to_tokens())
            .chain(self.end_semicolon.to_tokens())
            .collect()
    }
}

impl ToParseTree for FunctionDeclaration {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.fungsi)
            .with(&self.name)
            .with_opt(self.parameters.as_ref())
            .with(&self.colon)
            .with(&self.return_type)
            .with(&self.semicolon)
            .with(&self.block)
            .with(&self.end_semicolon)
            .into()
    }
}

/// `( parameter-group (; parameter-group)* )`
#[derive(Debug, Clone, PartialEq)]
pub struct FormalParameterList {
    pub lparen: LParen,
    pub groups: Punctuated<ParameterGroup, Semicolon>,
    pub rparen: RParen,
}

impl Parsable for FormalParameterList {
    const NON_TERMINAL: &'static str = "<formal-parameter-list>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        let lparen = parser.parse()?;
        let mut groups = Punctuated::default();
        let mut group: ParameterGroup = parser.parse()?;
        while let Some(semicolon) = parser.parse_opt::<Semicolon>()? {
            groups.punctuated.push((group, Some(semicolon)));
            group = parser.parse()?;
        }
        groups.punctuated.push((group, None));
        Ok(Self {
            lparen,
            groups,
            rparen: parser.parse()?,
        })
    }
}

impl CouldParse for FormalParameterList {
    fn could_parse(parser: &SyntacticParser<'_>) -> bool {
        LParen::could_parse(parser)
    }
}

impl ToTokens for FormalParameterList {
    fn to_tokens(&self) -> TokenStream {
        self.lparen
            .to_tokens()
            .chain(self.groups.to_tokens())
            .chain(self.rparen.to_tokens())
            .collect()
    }
}

impl ToParseTree for FormalParameterList {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.lparen)
            .with_children(self.groups.parse_tree_children())
            .with(&self.rparen)
            .into()
    }
}

/// `identifier-list : type`
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGroup {
    pub names: IdentifierList,
    pub colon: Colon,
    pub ty: Type,
}

impl Parsable for ParameterGroup {
    const NON_TERMINAL: &'static str = "<parameter-group>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            names: parser.parse()?,
            colon: parser.parse()?,
            ty: parser.parse()?,
        })
    }
}

impl ToTokens for ParameterGroup {
    fn to_tokens(&self) -> TokenStream {
        self.names
            .to_tokens()
            .chain(self.colon.to_tokens())
            .chain(self.ty.to_tokens())
            .collect()
    }
}

impl ToParseTree for ParameterGroup {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.names)
            .with(&self.colon)
            .with(&self.ty)
            .into()
    }
}

/// `declaration-part compound-statement`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub declarations: DeclarationPart,
    pub body: CompoundStatement,
}

impl Parsable for Block {
    const NON_TERMINAL: &'static str = "<block>";

    fn parse(parser: &mut SyntacticParser<'_>) -> Result<Self> {
        Ok(Self {
            declarations: parser.parse()?,
            body: parser.parse()?,
        })
    }
}

impl ToTokens for Block {
    fn to_tokens(&self) -> TokenStream {
        self.declarations
            .to_tokens()
            .chain(self.body.to_tokens())
            .collect()
    }
}

impl ToParseTree for Block {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeNode::new(Self::NON_TERMINAL)
            .with(&self.declarations)
            .with(&self.body)
            .into()
    }
}
