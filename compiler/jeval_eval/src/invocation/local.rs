//! Simulated calls of methods declared in the unit under evaluation.
//!
//! Such methods are usually still being edited and have no runtime
//! counterpart, so they are never invoked. Two shapes are understood:
//!
//! - a method documented with the return tag
//!   (`@wbp.eval.method.return name`) yields the argument passed for the
//!   named parameter;
//! - a parameterless method whose body is `return <expr>;` yields `<expr>`.

use jeval_ir::{ExprId, MethodDecl, MethodId};

use crate::errors::{invariant_violation, local_method, ErrorCause, EvalResult};
use crate::{AstEvaluationEngine, EvaluationContext};

pub(super) fn simulate(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    method: MethodId,
    decl: &MethodDecl,
    args: &[ExprId],
) -> EvalResult {
    let tree = ctx.tree();
    let signature = tree.method_key(method).signature();
    let return_tag = &engine.config().return_tag;
    if let Some(tag) = decl.tag(return_tag) {
        let parameter = tag.fragments.first().ok_or_else(|| {
            invariant_violation(format!("{return_tag} on {signature} names no parameter"))
        })?;
        let arg = decl
            .parameters
            .iter()
            .position(|&p| tree.variable(p).name == *parameter)
            .and_then(|index| args.get(index))
            .ok_or_else(|| {
                invariant_violation(format!("{signature} has no argument for parameter {parameter}"))
            })?;
        tracing::debug!(method = %signature, %parameter, "local method returns its argument");
        return engine.evaluate(ctx, *arg);
    }
    if decl.parameters.is_empty() {
        if let Some(body) = decl.single_return() {
            return engine.evaluate(ctx, body).map_err(|error| {
                local_method(&signature).with_cause(ErrorCause::Evaluation(Box::new(error)))
            });
        }
    }
    Err(local_method(&signature))
}
