//! The untyped view of the parse tree, labelled with grammar non-terminals

use pascal_ast::token::Token;
use pascal_ast::tree::{Connectors, TreeNode};
use std::fmt::{Display, Formatter};

/// A child in the parse tree
#[derive(Debug, Clone, PartialEq)]
pub enum ParseTreeChild {
    Node(ParseTreeNode),
    Token(Token),
}

/// A non-terminal and its children, in grammar order
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTreeNode {
    pub label: &'static str,
    pub children: Vec<ParseTreeChild>,
}

impl ParseTreeNode {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            children: vec![],
        }
    }

    /// Adds a child
    pub fn with(mut self, child: &impl ToParseTree) -> Self {
        self.children.push(child.to_parse_tree());
        self
    }

    /// Adds a child if present
    pub fn with_opt(mut self, child: Option<&impl ToParseTree>) -> Self {
        if let Some(child) = child {
            self.children.push(child.to_parse_tree());
        }
        self
    }

    /// Adds every child in order
    pub fn with_all<'a, T: ToParseTree + 'a>(mut self, children: impl IntoIterator<Item = &'a T>) -> Self {
        self.children
            .extend(children.into_iter().map(ToParseTree::to_parse_tree));
        self
    }

    /// Adds already converted children
    pub fn with_children(mut self, children: impl IntoIterator<Item = ParseTreeChild>) -> Self {
        self.children.extend(children);
        self
    }

    /// Gets the child nodes with the given label
    pub fn nodes<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a ParseTreeNode> + 'a {
        self.children.iter().filter_map(move |child| match child {
            ParseTreeChild::Node(node) if node.label == label => Some(node),
            _ => None,
        })
    }

    /// Every token under this node, in source order
    pub fn leaves(&self) -> Vec<&Token> {
        let mut leaves = vec![];
        for child in &self.children {
            match child {
                ParseTreeChild::Node(node) => leaves.extend(node.leaves()),
                ParseTreeChild::Token(token) => leaves.push(token),
            }
        }
        leaves
    }

    pub fn to_tree(&self) -> TreeNode {
        TreeNode::new(
            self.label,
            self.children
                .iter()
                .map(|child| match child {
                    ParseTreeChild::Node(node) => node.to_tree(),
                    ParseTreeChild::Token(token) => TreeNode::leaf(token.to_string()),
                })
                .collect(),
        )
    }
}

impl Display for ParseTreeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_tree().render(Connectors::WIDE))
    }
}

/// Converts a typed parse tree part to its labelled form
pub trait ToParseTree {
    fn to_parse_tree(&self) -> ParseTreeChild;
}

impl ToParseTree for Token {
    fn to_parse_tree(&self) -> ParseTreeChild {
        ParseTreeChild::Token(self.clone())
    }
}

impl<T: ToParseTree> ToParseTree for Box<T> {
    fn to_parse_tree(&self) -> ParseTreeChild {
        (**self).to_parse_tree()
    }
}

impl From<ParseTreeNode> for ParseTreeChild {
    fn from(value: ParseTreeNode) -> Self {
        ParseTreeChild::Node(value)
    }
}
