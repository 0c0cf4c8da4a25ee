//! `(T) expr`.

use jeval_ir::{ExprId, ExprKind, TypeBinding};
use jeval_runtime::{reflect, Value};

use super::convert_to;
use crate::errors::class_cast;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct CastEvaluator;

impl ExpressionEvaluator for CastEvaluator {
    fn name(&self) -> &'static str {
        "cast"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        _type_name: &str,
    ) -> EvalOutcome {
        let tree = ctx.tree();
        let ExprKind::Cast { target, expr: operand } = tree.kind(expr) else {
            return Ok(Evaluation::Unknown);
        };
        let value = engine.evaluate(ctx, operand)?;
        let target_ty = tree.type_binding(target);
        if target_ty.is_primitive() {
            return convert_to(target_ty, value).map(Evaluation::Value);
        }
        if value.is_null() {
            return Ok(Value::Null.into());
        }
        let target_name = tree.binary_name(target);
        if reflect::is_instance(&value, &target_name) {
            Ok(value.into())
        } else {
            Err(class_cast(&value.class_name(), &target_name))
        }
    }
}
