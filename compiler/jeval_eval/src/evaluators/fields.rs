//! Reflective field reads and writes shared by the name, field-access and
//! assignment evaluators.

use jeval_ir::{ExprId, TypeId, VariableId};
use jeval_runtime::Value;

use crate::errors::{member_not_found, null_pointer, reflect_error, EvalResult};
use crate::flow::Assigned;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext};

pub(super) fn read_static(ctx: &EvaluationContext<'_>, class_name: &str, field: &str) -> EvalResult {
    let class = ctx.load_class(class_name)?;
    let def = class
        .find_field(field)
        .ok_or_else(|| member_not_found(&format!("field {field}"), class.name()))?;
    def.get(&Value::Null).map_err(|e| reflect_error(&e))
}

pub(super) fn write_static(
    ctx: &EvaluationContext<'_>,
    class_name: &str,
    field: &str,
    value: Value,
) -> EvalResult<()> {
    let class = ctx.load_class(class_name)?;
    let def = class
        .find_field(field)
        .ok_or_else(|| member_not_found(&format!("field {field}"), class.name()))?;
    def.set(&Value::Null, value).map_err(|e| reflect_error(&e))
}

/// `receiver.field`; arrays answer `length`.
pub(super) fn read_instance(receiver: &Value, field: &str) -> EvalResult {
    match receiver {
        Value::Null => Err(null_pointer(&format!(
            "cannot read field \"{field}\" because the receiver is null"
        ))),
        Value::Array(array) if field == "length" => Ok(Value::Int(array.len() as i32)),
        Value::Object(object) => {
            let def = object
                .class()
                .find_field(field)
                .ok_or_else(|| member_not_found(&format!("field {field}"), object.class().name()))?;
            def.get(receiver).map_err(|e| reflect_error(&e))
        }
        other => Err(member_not_found(&format!("field {field}"), &other.class_name())),
    }
}

pub(super) fn write_instance(receiver: &Value, field: &str, value: Value) -> EvalResult<()> {
    match receiver {
        Value::Null => Err(null_pointer(&format!(
            "cannot assign field \"{field}\" because the receiver is null"
        ))),
        Value::Object(object) => {
            let def = object
                .class()
                .find_field(field)
                .ok_or_else(|| member_not_found(&format!("field {field}"), object.class().name()))?;
            def.set(receiver, value).map_err(|e| reflect_error(&e))
        }
        other => Err(member_not_found(&format!("field {field}"), &other.class_name())),
    }
}

/// Value of a field of the code under evaluation, read through `this`
/// (explicitly or by simple name): the flow's last assignment before `at`,
/// then the declaration's initializer (or the type's zero), then the field
/// of the host-supplied `this` object.
pub(super) fn read_own_field(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    at: ExprId,
    field: VariableId,
) -> EvalOutcome {
    let tree = ctx.tree();
    let binding = tree.variable(field);
    if let Some(assigned) = ctx.flow().and_then(|flow| flow.last_assignment(field, at)) {
        return assigned_value(engine, ctx, assigned, binding.ty).map(Evaluation::Value);
    }
    if let Some(decl) = tree.find_field_decl(field) {
        let assigned = decl.initializer.map_or(Assigned::Uninitialized, Assigned::Value);
        return assigned_value(engine, ctx, assigned, binding.ty).map(Evaluation::Value);
    }
    match engine.this_value(ctx, at) {
        Ok(this) => read_instance(&this, &binding.name).map(Evaluation::Value),
        Err(_) => Ok(Evaluation::Unknown),
    }
}

pub(super) fn assigned_value(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    assigned: Assigned,
    ty: TypeId,
) -> EvalResult {
    match assigned {
        Assigned::Value(expr) => engine.evaluate(ctx, expr),
        Assigned::Uninitialized => Ok(Value::zero_for(&ctx.tree().binary_name(ty))),
    }
}
