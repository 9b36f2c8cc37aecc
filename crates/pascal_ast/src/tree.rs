//! A generic labelled tree, rendered with box drawing connectors

use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// The connectors used to draw a tree
#[derive(Debug, Copy, Clone)]
pub struct Connectors {
    pub branch: &'static str,
    pub last: &'static str,
    pub pipe: &'static str,
    pub blank: &'static str,
}

impl Connectors {
    /// `├── ` and `└── `
    pub const WIDE: Connectors = Connectors {
        branch: "├── ",
        last: "└── ",
        pipe: "│   ",
        blank: "    ",
    };

    /// `├─ ` and `└─ `
    pub const NARROW: Connectors = Connectors {
        branch: "├─ ",
        last: "└─ ",
        pipe: "│  ",
        blank: "   ",
    };
}

/// A node with a label and ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: vec![],
        }
    }

    pub fn new(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Renders this tree using the given connectors. The root is written without one.
    pub fn render(&self, connectors: Connectors) -> String {
        let mut lines = vec![self.label.clone()];
        self.render_children("", connectors, &mut lines);
        lines.iter().join("\n")
    }

    fn render_children(&self, indent: &str, connectors: Connectors, lines: &mut Vec<String>) {
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { connectors.last } else { connectors.branch };
            lines.push(format!("{indent}{connector}{}", child.label));
            let extension = if is_last { connectors.blank } else { connectors.pipe };
            child.render_children(&format!("{indent}{extension}"), connectors, lines);
        }
    }
}

impl Display for TreeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(Connectors::WIDE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_nested() {
        let tree = TreeNode::new(
            "<root>",
            vec![
                TreeNode::new("<a>", vec![TreeNode::leaf("x"), TreeNode::leaf("y")]),
                TreeNode::leaf("z"),
            ],
        );
        let expected = "<root>\n├── <a>\n│   ├── x\n│   └── y\n└── z";
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn render_narrow() {
        let tree = TreeNode::new("p", vec![TreeNode::new("q", vec![TreeNode::leaf("r")])]);
        assert_eq!(tree.render(Connectors::NARROW), "p\n└─ q\n   └─ r");
    }
}
