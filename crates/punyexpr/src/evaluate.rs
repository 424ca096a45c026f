//! Tree-walking evaluation of compiled nodes.

use crate::ast::{Node, NodeKind};
use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::operators::{self, member};
use crate::types::Value;
use crate::util::is_truthy;

/// Evaluates `node` against `ctx`.
///
/// Operands are evaluated left to right. `&&`, `||` and `?:` evaluate only
/// the operands that decide the result. Host errors propagate unchanged.
pub fn evaluate(node: &Node, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    match &node.kind {
        NodeKind::Constant(value) => Ok(value.clone()),
        NodeKind::Context(name) => Ok(ctx.context.get(name)),
        NodeKind::Property { object, key } => {
            let object = evaluate(object, ctx)?;
            let key = evaluate(key, ctx)?;
            member::get_property(&object, &key)
        }
        NodeKind::Call { callee, args } => {
            let function = evaluate(callee, ctx)?;
            let args = args
                .iter()
                .map(|arg| evaluate(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            member::call(&function, &args, || ctx.snippet(callee.range))
        }
        NodeKind::Array(items) => {
            let items = items
                .iter()
                .map(|item| evaluate(item, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::from(items))
        }
        NodeKind::Regex { pattern, flags } => ctx.regex.build(pattern, flags),
        NodeKind::Unary { op, operand } => {
            let operand = evaluate(operand, ctx)?;
            Ok(operators::apply_unary(*op, &operand))
        }
        NodeKind::Binary { op, left, right } => {
            operators::apply_binary(*op, evaluate(left, ctx)?, || evaluate(right, ctx))
        }
        NodeKind::Ternary {
            condition,
            consequent,
            alternate,
        } => {
            if is_truthy(&evaluate(condition, ctx)?) {
                evaluate(consequent, ctx)
            } else {
                evaluate(alternate, ctx)
            }
        }
    }
}
