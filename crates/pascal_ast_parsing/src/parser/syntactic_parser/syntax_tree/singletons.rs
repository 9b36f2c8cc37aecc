//! Syntax tree parts made of a single token

use super::helpers::{keyword_singleton, token_singleton};
use pascal_ast::token::TokenKind;

token_singleton!(Identifier, TokenKind::Identifier);
token_singleton!(Semicolon, TokenKind::Semicolon);
token_singleton!(Colon, TokenKind::Colon);
token_singleton!(Comma, TokenKind::Comma);
token_singleton!(Dot, TokenKind::Dot);
token_singleton!(LParen, TokenKind::LParenthesis);
token_singleton!(RParen, TokenKind::RParenthesis);
token_singleton!(LBracket, TokenKind::LBracket);
token_singleton!(RBracket, TokenKind::RBracket);
token_singleton!(Assign, TokenKind::AssignOperator);
token_singleton!(RangeOp, TokenKind::RangeOperator);
token_singleton!(Equals, TokenKind::RelationalOperator, "=");
token_singleton!(Not, TokenKind::LogicalOperator, "tidak");

keyword_singleton!(KwProgram, "program");
keyword_singleton!(KwConst, "konstanta");
keyword_singleton!(KwType, "tipe");
keyword_singleton!(KwVar, "variabel");
keyword_singleton!(KwProcedure, "prosedur");
keyword_singleton!(KwFunction, "fungsi");
keyword_singleton!(KwBegin, "mulai");
keyword_singleton!(KwEnd, "selesai");
keyword_singleton!(KwIf, "jika");
keyword_singleton!(KwThen, "maka");
keyword_singleton!(KwElse, "selain-itu");
keyword_singleton!(KwWhile, "selama");
keyword_singleton!(KwDo, "lakukan");
keyword_singleton!(KwFor, "untuk");
keyword_singleton!(KwRepeat, "ulangi");
keyword_singleton!(KwUntil, "sampai");
keyword_singleton!(KwArray, "larik");
keyword_singleton!(KwOf, "dari");

impl Identifier {
    pub fn name(&self) -> &str {
        self.token.text()
    }
}
