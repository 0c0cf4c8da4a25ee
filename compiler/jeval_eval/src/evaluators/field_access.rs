//! `receiver.field` where the receiver is an arbitrary expression.

use jeval_ir::{ExprId, ExprKind, TypeBinding};

use super::fields::{read_instance, read_own_field, read_static};
use crate::errors::member_not_found;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct FieldAccessEvaluator;

impl ExpressionEvaluator for FieldAccessEvaluator {
    fn name(&self) -> &'static str {
        "field access"
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
        let ExprKind::FieldAccess {
            receiver,
            name,
            field,
        } = tree.kind(expr)
        else {
            return Ok(Evaluation::Unknown);
        };
        let binding = tree.variable(field);
        if binding.is_static() {
            if let Some(owner) = binding.declaring_type {
                let value = read_static(ctx, &tree.binary_name(owner), &binding.name)?;
                return Ok(value.into());
            }
        }
        if matches!(tree.kind(tree.unparenthesized(receiver)), ExprKind::This) {
            return match read_own_field(engine, ctx, expr, field)? {
                Evaluation::Unknown => Err(member_not_found(
                    &format!("field {}", binding.name),
                    &tree.qualified_name(tree.expr(receiver).ty),
                )),
                known => Ok(known),
            };
        }
        let object = engine.evaluate(ctx, receiver)?;
        read_instance(&object, tree.name(name)).map(Evaluation::Value)
    }
}
