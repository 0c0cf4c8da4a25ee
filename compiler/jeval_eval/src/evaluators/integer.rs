//! `int` expressions, plus increments of the narrower integral types.

use jeval_ir::{ExprId, PrimitiveKind, TypeBinding};

use super::arithmetic::{evaluate_increment, evaluate_number};
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct IntegerEvaluator;

impl ExpressionEvaluator for IntegerEvaluator {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        match PrimitiveKind::from_name(type_name) {
            Some(PrimitiveKind::Int) => evaluate_number::<i32>(engine, ctx, expr),
            Some(kind @ (PrimitiveKind::Byte | PrimitiveKind::Short)) => {
                evaluate_increment(engine, ctx, expr, kind)
            }
            _ => Ok(Evaluation::Unknown),
        }
    }
}
