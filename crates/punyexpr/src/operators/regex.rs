//! Default regex constructor and built-in members of regex values.

use crate::error::EvalError;
use crate::types::{Function, RegexValue, Value};
use crate::util::to_string;
use std::sync::Arc;
use tracing::debug;

/// Builds a regex value from literal `pattern` and `flags`.
///
/// `i`, `m` and `s` map onto the matcher; `g`, `y`, `d`, `u` and `v` are
/// recorded only. Unknown or repeated flags are rejected.
pub fn build(pattern: &str, flags: &str) -> Result<Value, EvalError> {
    let invalid = |reason: String| {
        debug!(pattern, flags, %reason, "regex construction failed");
        EvalError::InvalidRegex {
            pattern: pattern.to_string(),
            flags: flags.to_string(),
            reason,
        }
    };
    let mut builder = ::regex::RegexBuilder::new(pattern);
    for (i, flag) in flags.char_indices() {
        if flags[..i].contains(flag) {
            return Err(invalid(format!("duplicate flag '{}'", flag)));
        }
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'g' | 'y' | 'd' | 'u' | 'v' => {}
            other => return Err(invalid(format!("unknown flag '{}'", other))),
        }
    }
    let regex = builder.build().map_err(|err| invalid(err.to_string()))?;
    Ok(Value::Regex(Arc::new(RegexValue {
        source: pattern.to_string(),
        flags: flags.to_string(),
        regex,
    })))
}

/// Resolves `key` on a regex value.
pub fn member(re: &RegexValue, key: &Value) -> Value {
    match to_string(key).as_str() {
        "source" => Value::from(re.source()),
        "flags" => Value::from(re.flags()),
        "global" => Value::Bool(re.has_flag('g')),
        "ignoreCase" => Value::Bool(re.has_flag('i')),
        "multiline" => Value::Bool(re.has_flag('m')),
        "test" => Value::Function(Function::new(|this, args| {
            let haystack = args.first().map(to_string).unwrap_or_else(|| "undefined".to_string());
            match this {
                Value::Regex(re) => Ok(Value::Bool(re.is_match(&haystack))),
                other => Err(EvalError::Thrown(format!(
                    "Method RegExp.prototype.test called on incompatible receiver {}",
                    to_string(other)
                ))),
            }
        })),
        _ => Value::Undefined,
    }
}
