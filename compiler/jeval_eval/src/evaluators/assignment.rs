//! `target = value` and compound assignments.
//!
//! The result is the assigned value converted to the target's type. Where
//! the target is reachable (an array element, a field of an evaluated
//! object, a static field) the value is also stored, so later reads through
//! the same object observe it.

use jeval_ir::{AssignOp, ExprId, ExprKind, InfixOp, NameBinding, TypeBinding, VariableId};
use jeval_runtime::Value;

use super::array::store_element;
use super::fields::{write_instance, write_static};
use super::{convert_to, stringify};
use crate::errors::EvalResult;
use crate::numeric;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct AssignmentEvaluator;

impl ExpressionEvaluator for AssignmentEvaluator {
    fn name(&self) -> &'static str {
        "assignment"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        let ExprKind::Assignment { op, target, value } = ctx.tree().kind(expr) else {
            return Ok(Evaluation::Unknown);
        };
        let result = match op {
            AssignOp::Assign => engine.evaluate(ctx, value)?,
            AssignOp::Compound(infix) => {
                let current = engine.evaluate(ctx, target)?;
                let rhs = engine.evaluate(ctx, value)?;
                if infix == InfixOp::Add && type_name == "java.lang.String" {
                    Value::string(stringify(&current)? + &stringify(&rhs)?)
                } else {
                    numeric::binary(infix, &current, &rhs)?
                }
            }
        };
        let result = convert_to(ty, result)?;
        store(engine, ctx, target, result.clone())?;
        Ok(result.into())
    }
}

fn store(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    target: ExprId,
    value: Value,
) -> EvalResult<()> {
    let tree = ctx.tree();
    let target = tree.unparenthesized(target);
    match tree.kind(target) {
        ExprKind::ArrayAccess { array, index } => {
            let array = engine.evaluate(ctx, array)?;
            let index = numeric::as_int(&engine.evaluate(ctx, index)?)?;
            store_element(&array, index, value)
        }
        ExprKind::FieldAccess {
            receiver, field, ..
        }
        | ExprKind::QualifiedName {
            qualifier: receiver,
            binding: NameBinding::Variable(field),
            ..
        } => store_field(engine, ctx, target, Some(receiver), field, value),
        ExprKind::SimpleName {
            binding: NameBinding::Variable(variable),
            ..
        } => store_field(engine, ctx, target, None, variable, value),
        _ => Ok(()),
    }
}

/// Fields of `this` and static fields are stored when possible; the code
/// under evaluation is often not loadable, so failing to store them is not
/// an error.
fn store_field(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    target: ExprId,
    receiver: Option<ExprId>,
    field: VariableId,
    value: Value,
) -> EvalResult<()> {
    let tree = ctx.tree();
    let binding = tree.variable(field);
    if !binding.is_field() {
        return Ok(());
    }
    if binding.is_static() {
        let Some(owner) = binding.declaring_type else {
            return Ok(());
        };
        if let Err(error) = write_static(ctx, &tree.binary_name(owner), &binding.name, value) {
            tracing::debug!(field = %binding.name, %error, "static field not stored");
        }
        return Ok(());
    }
    match receiver.map(|r| (r, tree.kind(tree.unparenthesized(r)))) {
        Some((receiver, kind)) if !matches!(kind, ExprKind::This) => {
            let object = engine.evaluate(ctx, receiver)?;
            write_instance(&object, &binding.name, value)
        }
        _ => {
            let stored = engine
                .this_value(ctx, target)
                .and_then(|this| write_instance(&this, &binding.name, value));
            if let Err(error) = stored {
                tracing::debug!(field = %binding.name, %error, "field of this not stored");
            }
            Ok(())
        }
    }
}
