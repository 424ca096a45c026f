//! Compiled expression tree and its serializable mirror.

use crate::types::Value;
use serde::Serialize;

/// Span of source text, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub offset: usize,
    pub length: usize,
}

impl Range {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Smallest range covering both `self` and `other`.
    pub fn cover(self, other: Range) -> Range {
        let offset = self.offset.min(other.offset);
        Range::new(offset, self.end().max(other.end()) - offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    TypeOf,
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Plus => "pos",
            UnaryOp::Minus => "neg",
            UnaryOp::Not => "not",
            UnaryOp::TypeOf => "typeof",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Exp,
    Lt,
    Gt,
    Lte,
    Gte,
    Eq,
    Neq,
    StrictEq,
    StrictNeq,
    And,
    Or,
}

impl BinaryOp {
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Rem => "remainder",
            BinaryOp::Exp => "exp",
            BinaryOp::Lt => "lt",
            BinaryOp::Gt => "gt",
            BinaryOp::Lte => "lte",
            BinaryOp::Gte => "gte",
            BinaryOp::Eq => "eq",
            BinaryOp::Neq => "neq",
            BinaryOp::StrictEq => "eqq",
            BinaryOp::StrictNeq => "neqq",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Constant(Value),
    /// Bare name looked up on the evaluation context.
    Context(String),
    /// Member read; `.name` is stored as a constant key.
    Property {
        object: Box<Node>,
        key: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    Array(Vec<Node>),
    Regex {
        pattern: String,
        flags: String,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Ternary {
        condition: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
}

/// One operation of a compiled expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Range,
}

impl Node {
    pub fn new(kind: NodeKind, range: Range) -> Self {
        Self { kind, range }
    }

    pub fn op_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Constant(_) => "constant",
            NodeKind::Context(_) => "context",
            NodeKind::Property { .. } => "property",
            NodeKind::Call { .. } => "call",
            NodeKind::Array(_) => "array",
            NodeKind::Regex { .. } => "regex",
            NodeKind::Unary { op, .. } => op.name(),
            NodeKind::Binary { op, .. } => op.name(),
            NodeKind::Ternary { .. } => "ternary",
        }
    }

    /// Visits this node and all its descendants, parents first, operands in
    /// source order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        match &self.kind {
            NodeKind::Constant(_) | NodeKind::Context(_) | NodeKind::Regex { .. } => {}
            NodeKind::Property { object, key } => {
                object.walk(&mut *f);
                key.walk(f);
            }
            NodeKind::Call { callee, args } => {
                callee.walk(&mut *f);
                for arg in args {
                    arg.walk(&mut *f);
                }
            }
            NodeKind::Array(items) => {
                for item in items {
                    item.walk(&mut *f);
                }
            }
            NodeKind::Unary { operand, .. } => operand.walk(f),
            NodeKind::Binary { left, right, .. } => {
                left.walk(&mut *f);
                right.walk(f);
            }
            NodeKind::Ternary {
                condition,
                consequent,
                alternate,
            } => {
                condition.walk(&mut *f);
                consequent.walk(&mut *f);
                alternate.walk(f);
            }
        }
    }

    pub fn to_ast(&self) -> AstNode {
        let args = match &self.kind {
            NodeKind::Constant(value) => vec![AstArg::Scalar(value.clone())],
            NodeKind::Context(name) => vec![AstArg::Scalar(Value::from(name.as_str()))],
            NodeKind::Property { object, key } => {
                vec![AstArg::Node(object.to_ast()), AstArg::Node(key.to_ast())]
            }
            NodeKind::Call { callee, args } => vec![
                AstArg::Node(callee.to_ast()),
                AstArg::List(args.iter().map(Node::to_ast).collect()),
            ],
            NodeKind::Array(items) => vec![AstArg::List(items.iter().map(Node::to_ast).collect())],
            NodeKind::Regex { pattern, flags } => vec![
                AstArg::Scalar(Value::from(pattern.as_str())),
                AstArg::Scalar(Value::from(flags.as_str())),
            ],
            NodeKind::Unary { operand, .. } => vec![AstArg::Node(operand.to_ast())],
            NodeKind::Binary { left, right, .. } => {
                vec![AstArg::Node(left.to_ast()), AstArg::Node(right.to_ast())]
            }
            NodeKind::Ternary {
                condition,
                consequent,
                alternate,
            } => vec![
                AstArg::Node(condition.to_ast()),
                AstArg::Node(consequent.to_ast()),
                AstArg::Node(alternate.to_ast()),
            ],
        };
        AstNode {
            op: self.op_name(),
            at: self.range.offset,
            length: self.range.length,
            args,
        }
    }
}

/// Plain tree mirroring a compiled expression, for tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstNode {
    pub op: &'static str,
    pub at: usize,
    pub length: usize,
    pub args: Vec<AstArg>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AstArg {
    Node(AstNode),
    /// Call arguments and array elements.
    List(Vec<AstNode>),
    Scalar(Value),
}
