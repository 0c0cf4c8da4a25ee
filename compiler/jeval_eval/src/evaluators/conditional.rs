//! `condition ? a : b`.

use jeval_ir::{ExprId, ExprKind, TypeBinding};

use super::{as_boolean, convert_to};
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct ConditionalEvaluator;

impl ExpressionEvaluator for ConditionalEvaluator {
    fn name(&self) -> &'static str {
        "conditional"
    }

    /// Only the selected branch is evaluated. A primitive-typed conditional
    /// converts the branch value to its type (`b ? 1 : 2.0` is `1.0`).
    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        ty: &TypeBinding,
        _type_name: &str,
    ) -> EvalOutcome {
        let ExprKind::Conditional {
            condition,
            then_expr,
            else_expr,
        } = ctx.tree().kind(expr)
        else {
            return Ok(Evaluation::Unknown);
        };
        let branch = if as_boolean(&engine.evaluate(ctx, condition)?)? {
            then_expr
        } else {
            else_expr
        };
        let value = engine.evaluate(ctx, branch)?;
        convert_to(ty, value).map(Evaluation::Value)
    }
}
