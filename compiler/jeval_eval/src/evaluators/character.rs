use jeval_ir::{ExprId, ExprKind, PrimitiveKind, TypeBinding};
use jeval_runtime::Value;

use super::arithmetic::evaluate_increment;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

/// `char` literals and increments.
pub struct CharEvaluator;

impl ExpressionEvaluator for CharEvaluator {
    fn name(&self) -> &'static str {
        "char"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        if type_name != "char" {
            return Ok(Evaluation::Unknown);
        }
        match ctx.tree().kind(expr) {
            ExprKind::CharacterLiteral(unit) => Ok(Value::Char(unit).into()),
            _ => evaluate_increment(engine, ctx, expr, PrimitiveKind::Char),
        }
    }
}
