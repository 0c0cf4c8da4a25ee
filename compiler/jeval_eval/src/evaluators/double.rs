//! `double` expressions.

use jeval_ir::{ExprId, TypeBinding};

use super::arithmetic::evaluate_number;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct DoubleEvaluator;

impl ExpressionEvaluator for DoubleEvaluator {
    fn name(&self) -> &'static str {
        "double"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        if type_name != "double" {
            return Ok(Evaluation::Unknown);
        }
        evaluate_number::<f64>(engine, ctx, expr)
    }
}
