//! Variable-arity argument packing.

use jeval_ir::{MethodId, TypeKind};
use jeval_runtime::{ArrayRef, Value};

use crate::errors::EvalResult;
use crate::evaluators::convert_to;
use crate::EvaluationContext;

/// Shape `values` for a call of `method`: trailing arguments of a varargs
/// method are packed into one array of the variadic parameter's type. An
/// array (or `null`) already in the variadic position is passed as is.
pub(crate) fn pack_varargs(
    ctx: &EvaluationContext<'_>,
    method: MethodId,
    mut values: Vec<Value>,
) -> EvalResult<Vec<Value>> {
    let tree = ctx.tree();
    let binding = tree.method(method);
    if !binding.is_varargs() {
        return Ok(values);
    }
    let Some((&array_type, fixed)) = binding.parameter_types.split_last() else {
        return Ok(values);
    };
    let fixed = fixed.len();
    if values.len() < fixed {
        return Ok(values);
    }
    if values.len() == fixed + 1 && matches!(values[fixed], Value::Array(_) | Value::Null) {
        return Ok(values);
    }
    let TypeKind::Array { component } = tree.type_binding(array_type).kind else {
        return Ok(values);
    };
    let component = tree.type_binding(component);
    let packed = values
        .split_off(fixed)
        .into_iter()
        .map(|value| convert_to(component, value))
        .collect::<EvalResult<Vec<Value>>>()?;
    let class = ctx.load_class(&tree.binary_name(array_type))?;
    values.push(Value::Array(ArrayRef::new(class, packed)));
    Ok(values)
}
