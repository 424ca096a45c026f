//! Compilation entry points and the reusable compiled expression.

use crate::ast::{AstNode, Node, NodeKind};
use crate::context::Context;
use crate::error::{EvalError, ParseError};
use crate::eval_ctx::{EvalCtx, RegexSupport};
use crate::evaluate::evaluate;
use crate::parser::Parser;
use crate::tokenizer::tokenize;
use crate::types::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Options for [`compile_with`].
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub regex: RegexSupport,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts regex literals, built with the default constructor.
    pub fn with_regex(mut self, enabled: bool) -> Self {
        self.regex = if enabled {
            RegexSupport::Default
        } else {
            RegexSupport::Disabled
        };
        self
    }

    /// Accepts regex literals, built by `builder(pattern, flags)`.
    pub fn with_regex_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn(&str, &str) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.regex = RegexSupport::Builder(Arc::new(builder));
        self
    }
}

/// Compiles `source` with default options (regex literals disabled).
pub fn compile(source: &str) -> Result<CompiledExpression, ParseError> {
    compile_with(source, CompileOptions::default())
}

/// Compiles `source`. The first problem found aborts compilation.
pub fn compile_with(source: &str, options: CompileOptions) -> Result<CompiledExpression, ParseError> {
    let parsed = tokenize(source).and_then(|tokens| Parser::parse(&tokens, options.regex.is_enabled()));
    match parsed {
        Ok(root) => {
            let mut nodes = 0usize;
            root.walk(&mut |_| nodes += 1);
            debug!(nodes, "compiled expression");
            Ok(CompiledExpression {
                source: source.to_string(),
                root,
                regex: options.regex,
            })
        }
        Err(err) => {
            debug!(kind = err.kind().name(), offset = ?err.offset(), "expression rejected");
            Err(err)
        }
    }
}

/// An immutable, re-evaluable compiled expression.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    source: String,
    root: Node,
    regex: RegexSupport,
}

impl CompiledExpression {
    /// Evaluates the expression against `context`. Each call is independent.
    pub fn evaluate(&self, context: &Context) -> Result<Value, EvalError> {
        let ctx = EvalCtx::new(context, &self.source, &self.regex);
        evaluate(&self.root, &ctx)
    }

    /// The exact text this expression was compiled from.
    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn to_ast(&self) -> AstNode {
        self.root.to_ast()
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.to_ast())
    }

    /// Distinct context names the expression reads, sorted.
    pub fn contextual_names(&self) -> Vec<&str> {
        let mut names = BTreeSet::new();
        self.root.walk(&mut |node| {
            if let NodeKind::Context(name) = &node.kind {
                names.insert(name.as_str());
            }
        });
        names.into_iter().collect()
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
