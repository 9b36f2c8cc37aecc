//! Renders a (possibly decorated) program as a tree

use crate::declarations::{ConstDecl, DeclarationPart, Param, Subprogram, TypeDecl, TypeSpec, VarDecl};
use crate::expr::Expr;
use crate::program::Program;
use crate::statements::{AssignTarget, CompoundStatement, Statement};
use crate::tree::{Connectors, TreeNode};
use std::fmt::{Display, Formatter};

/// Something that can be shown as a node of the printed tree
pub trait ToTree {
    fn to_tree(&self) -> TreeNode;
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_tree().render(Connectors::NARROW))
    }
}

impl ToTree for Program {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new(
            format!("ProgramNode(name: '{}'){}", self.name, self.decoration),
            vec![self.declarations.to_tree(), self.body.to_tree()],
        )
    }
}

impl ToTree for DeclarationPart {
    fn to_tree(&self) -> TreeNode {
        let children = self
            .constants
            .iter()
            .map(ToTree::to_tree)
            .chain(self.types.iter().map(ToTree::to_tree))
            .chain(self.variables.iter().map(ToTree::to_tree))
            .chain(self.subprograms.iter().map(ToTree::to_tree))
            .collect();
        TreeNode::new("Declarations", children)
    }
}

impl ToTree for ConstDecl {
    fn to_tree(&self) -> TreeNode {
        TreeNode::leaf(format!(
            "ConstDecl('{}' = {}){}",
            self.name, self.value, self.decoration
        ))
    }
}

impl ToTree for TypeDecl {
    fn to_tree(&self) -> TreeNode {
        let label = format!("TypeDecl('{}'){}", self.name, self.decoration);
        match &self.ty {
            TypeSpec::Primitive(p) => TreeNode::leaf(format!("{label}: {p}")),
            other => TreeNode::new(label, vec![other.to_tree()]),
        }
    }
}

impl ToTree for VarDecl {
    fn to_tree(&self) -> TreeNode {
        TreeNode::leaf(format!(
            "VarDecl('{}', type: '{}'){}",
            self.name, self.ty, self.decoration
        ))
    }
}

impl ToTree for Param {
    fn to_tree(&self) -> TreeNode {
        TreeNode::leaf(format!(
            "Param('{}', type: '{}'){}",
            self.name, self.ty, self.decoration
        ))
    }
}

impl ToTree for Subprogram {
    fn to_tree(&self) -> TreeNode {
        let label = match &self.return_type {
            None => format!("ProcedureDecl('{}'){}", self.name, self.decoration),
            Some(ret) => format!("FunctionDecl('{}': {}){}", self.name, ret, self.decoration),
        };
        let mut children: Vec<TreeNode> = self.params.iter().map(ToTree::to_tree).collect();
        if !self.declarations.is_empty() {
            children.push(self.declarations.to_tree());
        }
        children.push(self.body.to_tree());
        TreeNode::new(label, children)
    }
}

impl ToTree for TypeSpec {
    fn to_tree(&self) -> TreeNode {
        match self {
            TypeSpec::Primitive(p) => TreeNode::leaf(p.to_string()),
            TypeSpec::Array(array) => TreeNode::new(
                "ArrayType",
                vec![
                    TreeNode::new(
                        "Range",
                        vec![array.range.start.to_tree(), array.range.end.to_tree()],
                    ),
                    array.element.to_tree(),
                ],
            ),
            TypeSpec::Custom(name) => TreeNode::leaf(format!("CustomType('{name}')")),
            TypeSpec::Range(range) => TreeNode::new(
                "RangeType",
                vec![range.start.to_tree(), range.end.to_tree()],
            ),
        }
    }
}

impl ToTree for CompoundStatement {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new(
            format!("Block{}", self.decoration),
            self.statements.iter().map(ToTree::to_tree).collect(),
        )
    }
}

impl ToTree for Statement {
    fn to_tree(&self) -> TreeNode {
        match self {
            Statement::Compound(c) => c.to_tree(),
            Statement::Assignment(a) => {
                let mut children = vec![];
                let target = match &a.target {
                    AssignTarget::Variable(v) => format!("'{}'{}", v.name, v.decoration),
                    AssignTarget::Element(e) => {
                        children.push(e.index.to_tree());
                        format!("'{}[...]'{}", e.array, e.decoration)
                    }
                };
                children.push(a.value.to_tree());
                TreeNode::new(format!("Assign({target} :=){}", a.decoration), children)
            }
            Statement::If(i) => {
                let mut children = vec![i.condition.to_tree(), i.then_branch.to_tree()];
                if let Some(else_branch) = &i.else_branch {
                    children.push(else_branch.to_tree());
                }
                TreeNode::new(format!("If{}", i.decoration), children)
            }
            Statement::While(w) => TreeNode::new(
                format!("While{}", w.decoration),
                vec![w.condition.to_tree(), w.body.to_tree()],
            ),
            Statement::For(f) => TreeNode::new(
                format!("For('{}' {}){}", f.variable, f.direction, f.decoration),
                vec![f.start.to_tree(), f.end.to_tree(), f.body.to_tree()],
            ),
            Statement::Repeat(r) => {
                let mut children: Vec<TreeNode> = r.body.iter().map(ToTree::to_tree).collect();
                children.push(r.condition.to_tree());
                TreeNode::new(format!("Repeat{}", r.decoration), children)
            }
            Statement::ProcedureCall(call) => TreeNode::new(
                format!("{}(...){}", call.name, call.decoration),
                call.args.iter().map(ToTree::to_tree).collect(),
            ),
            Statement::Empty => TreeNode::leaf("EmptyStatement"),
        }
    }
}

impl ToTree for Expr {
    fn to_tree(&self) -> TreeNode {
        match self {
            Expr::Binary(b) => TreeNode::new(
                format!("BinOp '{}'{}", b.op, b.decoration),
                vec![b.left.to_tree(), b.right.to_tree()],
            ),
            Expr::Unary(u) => TreeNode::new(
                format!("UnaryOp '{}'{}", u.op, u.decoration),
                vec![u.operand.to_tree()],
            ),
            Expr::Variable(v) => TreeNode::leaf(format!("'{}'{}", v.name, v.decoration)),
            Expr::Index(a) => TreeNode::new(
                format!("'{}[...]'{}", a.array, a.decoration),
                vec![a.index.to_tree()],
            ),
            Expr::Call(c) => TreeNode::new(
                format!("{}(...){}", c.name, c.decoration),
                c.args.iter().map(ToTree::to_tree).collect(),
            ),
            Expr::Number(n) => TreeNode::leaf(format!("{}{}", n.value, n.decoration)),
            Expr::Char(c) => TreeNode::leaf(format!("'{}'{}", c.value, c.decoration)),
            Expr::String(s) => TreeNode::leaf(format!("'{}'{}", s.value, s.decoration)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::PrimitiveType;
    use crate::decoration::Decoration;
    use crate::expr::VarRef;
    use crate::statements::Assignment;

    #[test]
    fn print_undecorated_program() {
        let mut declarations = DeclarationPart::default();
        declarations.variables.push(VarDecl {
            name: "x".to_string(),
            ty: TypeSpec::Primitive(PrimitiveType::Integer),
            decoration: Decoration::default(),
        });
        let body = CompoundStatement::new(vec![Statement::Assignment(Assignment {
            target: AssignTarget::Variable(VarRef::new("x")),
            value: Expr::integer(1),
            decoration: Decoration::default(),
        })]);
        let program = Program::new("demo", declarations, body);
        let expected = "\
ProgramNode(name: 'demo')
├─ Declarations
│  └─ VarDecl('x', type: 'integer')
└─ Block
   └─ Assign('x' :=)
      └─ 1";
        assert_eq!(program.to_string(), expected);
    }
}
