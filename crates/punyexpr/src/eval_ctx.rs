use crate::ast::Range;
use crate::context::Context;
use crate::error::EvalError;
use crate::operators;
use crate::types::Value;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied regex constructor: `(pattern, flags) -> value`.
pub type RegexBuilder = dyn Fn(&str, &str) -> Result<Value, EvalError> + Send + Sync;

/// Whether regex literals are accepted, and how they are built.
#[derive(Clone, Default)]
pub enum RegexSupport {
    /// Regex literals fail to compile.
    #[default]
    Disabled,
    /// Regex literals are built with the `regex` crate.
    Default,
    /// Regex literals are built by the given function.
    Builder(Arc<RegexBuilder>),
}

impl RegexSupport {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, RegexSupport::Disabled)
    }

    /// Builds the value of a regex literal. With support disabled, nothing
    /// is built and the literal is reported as invalid.
    pub fn build(&self, pattern: &str, flags: &str) -> Result<Value, EvalError> {
        match self {
            RegexSupport::Builder(builder) => builder(pattern, flags),
            RegexSupport::Default => operators::regex::build(pattern, flags),
            RegexSupport::Disabled => Err(EvalError::InvalidRegex {
                pattern: pattern.to_string(),
                flags: flags.to_string(),
                reason: "regular expressions are disabled".to_string(),
            }),
        }
    }
}

impl fmt::Debug for RegexSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegexSupport::Disabled => f.write_str("Disabled"),
            RegexSupport::Default => f.write_str("Default"),
            RegexSupport::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

/// State shared by every node during one evaluation.
pub struct EvalCtx<'a> {
    /// The caller's name/value mapping.
    pub context: &'a Context,
    /// Source text, for naming sub-expressions in errors.
    pub source: &'a str,
    pub regex: &'a RegexSupport,
}

impl<'a> EvalCtx<'a> {
    pub fn new(context: &'a Context, source: &'a str, regex: &'a RegexSupport) -> Self {
        EvalCtx {
            context,
            source,
            regex,
        }
    }

    /// The source text covered by `range`.
    pub fn snippet(&self, range: Range) -> String {
        self.source
            .get(range.offset..range.end())
            .unwrap_or("expression")
            .to_string()
    }
}
