//! `float` expressions.

use jeval_ir::{ExprId, TypeBinding};

use super::arithmetic::evaluate_number;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct FloatEvaluator;

impl ExpressionEvaluator for FloatEvaluator {
    fn name(&self) -> &'static str {
        "float"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        if type_name != "float" {
            return Ok(Evaluation::Unknown);
        }
        evaluate_number::<f32>(engine, ctx, expr)
    }
}
