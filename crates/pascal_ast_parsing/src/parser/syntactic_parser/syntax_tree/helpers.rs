use super::parse_tree::{ParseTreeChild, ToParseTree};
use pascal_ast::token::{ToTokens, TokenStream};

/// Defines a struct wrapping exactly one token, of a kind and optionally with fixed text
macro_rules! token_singleton {
    (@define $ty:ident, $kind:expr, $text:expr) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty {
            pub token: pascal_ast::token::Token,
        }

        #[automatically_derived]
        impl pascal_ast::token::ToTokens for $ty {
            fn to_tokens(&self) -> pascal_ast::token::TokenStream {
                pascal_ast::token::TokenStream::from_iter([self.token.clone()])
            }
        }

        #[automatically_derived]
        impl $crate::parser::syntax_tree::parse_tree::ToParseTree for $ty {
            fn to_parse_tree(&self) -> $crate::parser::syntax_tree::parse_tree::ParseTreeChild {
                $crate::parser::syntax_tree::parse_tree::ParseTreeChild::Token(self.token.clone())
            }
        }

        #[automatically_derived]
        impl $crate::parser::Parsable for $ty {
            const NON_TERMINAL: &'static str = stringify!($ty);

            fn parse(parser: &mut $crate::parser::SyntacticParser<'_>) -> $crate::parser::Result<Self> {
                let text: Option<&'static str> = $text;
                match text {
                    Some(text) => parser.expect_text($kind, text),
                    None => parser.expect($kind),
                }
                .map(|token| $ty { token })
            }
        }

        #[automatically_derived]
        impl $crate::parser::CouldParse for $ty {
            fn could_parse(parser: &$crate::parser::SyntacticParser<'_>) -> bool {
                let text: Option<&'static str> = $text;
                match text {
                    Some(text) => parser.at_text($kind, text),
                    None => parser.at($kind),
                }
            }
        }
    };
    ($ty:ident, $kind:expr) => {
        token_singleton!(@define $ty, $kind, None);
    };
    ($ty:ident, $kind:expr, $text:literal) => {
        token_singleton!(@define $ty, $kind, Some($text));
    };
}

/// Defines a [token_singleton] for a keyword
macro_rules! keyword_singleton {
    ($ty:ident, $keyword:literal) => {
        token_singleton!($ty, pascal_ast::token::TokenKind::Keyword, $keyword);
    };
}

pub(crate) use keyword_singleton;
pub(crate) use token_singleton;

/// Items separated by punctuation, `P` following every item but the last
#[derive(Debug, Clone, PartialEq)]
pub struct Punctuated<T, P> {
    pub punctuated: Vec<(T, Option<P>)>,
}

impl<T, P> Default for Punctuated<T, P> {
    fn default() -> Self {
        Self { punctuated: vec![] }
    }
}

impl<T, P> Punctuated<T, P> {
    /// The items, without their punctuation
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.punctuated.iter().map(|(item, _)| item)
    }

    pub fn len(&self) -> usize {
        self.punctuated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.punctuated.is_empty()
    }
}

impl<T: ToTokens, P: ToTokens> ToTokens for Punctuated<T, P> {
    fn to_tokens(&self) -> TokenStream {
        self.punctuated
            .iter()
            .flat_map(|(t, p)| t.to_tokens().chain(p.to_tokens()))
            .collect()
    }
}

impl<T: ToParseTree, P: ToParseTree> Punctuated<T, P> {
    /// The items and punctuation as sibling children
    pub fn parse_tree_children(&self) -> Vec<ParseTreeChild> {
        let mut children = vec![];
        for (item, punct) in &self.punctuated {
            children.push(item.to_parse_tree());
            if let Some(punct) = punct {
                children.push(punct.to_parse_tree());
            }
        }
        children
    }
}
