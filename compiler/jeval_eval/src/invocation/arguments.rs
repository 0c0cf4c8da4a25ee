use jeval_ir::{ExprId, ExprKind, SyntaxTree};
use jeval_runtime::{reflect, Value};

use crate::errors::EvalResult;
use crate::{AstEvaluationEngine, EvaluationContext};

const DUMP_FAILED: &str = "<Exception during arguments.toString()>";

/// Argument expressions of an invocation or creation node.
pub(crate) fn invocation_arguments(tree: &SyntaxTree, expr: ExprId) -> &[ExprId] {
    match tree.kind(expr) {
        ExprKind::MethodInvocation { args, .. }
        | ExprKind::SuperMethodInvocation { args, .. }
        | ExprKind::ClassInstanceCreation { args, .. } => tree.list(args),
        _ => &[],
    }
}

/// Evaluate arguments left to right. With `downgrade_anonymous`, an
/// argument that is an anonymous class nothing could instantiate becomes
/// `null` instead of failing the call.
pub(super) fn evaluate_arguments(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    args: &[ExprId],
    downgrade_anonymous: bool,
) -> EvalResult<Vec<Value>> {
    args.iter()
        .map(|&arg| match engine.evaluate(ctx, arg) {
            Err(error) if downgrade_anonymous && error.is_anonymous_evaluation() => {
                tracing::debug!(%error, "anonymous argument replaced by null");
                Ok(Value::Null)
            }
            other => other,
        })
        .collect()
}

/// Replace arguments written as `this` that the parameter cannot accept
/// with `null`. Only the first `fixed` positions are considered; a packed
/// varargs array never came from a lone `this`.
pub(super) fn null_this_arguments(
    ctx: &EvaluationContext<'_>,
    args: &[ExprId],
    parameter_types: &[String],
    fixed: usize,
    mut values: Vec<Value>,
) -> Vec<Value> {
    let tree = ctx.tree();
    for (index, (&arg, value)) in args.iter().zip(values.iter_mut()).enumerate().take(fixed) {
        if !matches!(tree.kind(tree.unparenthesized(arg)), ExprKind::This) {
            continue;
        }
        let Some(parameter_type) = parameter_types.get(index) else {
            continue;
        };
        if !reflect::is_assignable(value, parameter_type) {
            tracing::debug!(index, parameter_type = %parameter_type, "this argument replaced by null");
            *value = Value::Null;
        }
    }
    values
}

/// `{a,b,<null>}` for diagnostics. A failing `toString()` does not mask
/// the original failure.
pub(super) fn dump(values: &[Value]) -> String {
    let mut parts = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::Null => parts.push("<null>".to_string()),
            other => match reflect::to_java_string(other) {
                Ok(text) => parts.push(text),
                Err(_) => return DUMP_FAILED.to_string(),
            },
        }
    }
    format!("{{{}}}", parts.join(","))
}
