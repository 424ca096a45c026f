//! punyexpr: a tiny expression language with JavaScript-like semantics.
//!
//! # Overview
//!
//! Source text is tokenized, parsed into a tree and wrapped in a
//! [`CompiledExpression`] that can be evaluated any number of times against
//! different [`Context`]s. Expressions are pure reads: they cannot assign,
//! declare or loop, and only call functions the caller put in the context.
//!
//! # Example
//!
//! ```
//! use punyexpr::{compile, Context, Value};
//!
//! let expr = compile("price * (1 + rate) > limit ? 'high' : 'low'").unwrap();
//! let ctx = Context::new()
//!     .with("price", 100)
//!     .with("rate", 0.2)
//!     .with("limit", 110);
//!
//! assert_eq!(expr.evaluate(&ctx).unwrap(), Value::from("high"));
//! assert_eq!(expr.contextual_names(), vec!["limit", "price", "rate"]);
//! ```

pub mod ast;
pub mod compile;
pub mod context;
pub mod error;
pub mod eval_ctx;
pub mod evaluate;
pub mod operators;
pub mod parser;
pub mod tokenizer;
pub mod types;
pub mod util;

// Re-export the core public API
pub use ast::{AstArg, AstNode, BinaryOp, Node, NodeKind, Range, UnaryOp};
pub use compile::{compile, compile_with, CompileOptions, CompiledExpression};
pub use context::Context;
pub use error::{ErrorKind, EvalError, ParseError};
pub use eval_ctx::{RegexBuilder, RegexSupport};
pub use tokenizer::{tokenize, Token, TokenKind, TokenValue};
pub use types::{Function, NativeFn, Object, RegexValue, Value};

/// Version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
