//! `long` expressions.

use jeval_ir::{ExprId, TypeBinding};

use super::arithmetic::evaluate_number;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct LongEvaluator;

impl ExpressionEvaluator for LongEvaluator {
    fn name(&self) -> &'static str {
        "long"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        if type_name != "long" {
            return Ok(Evaluation::Unknown);
        }
        evaluate_number::<i64>(engine, ctx, expr)
    }
}
