//! Array creation, initializers and element access.

use jeval_ir::{ExprId, ExprKind, TypeBinding, TypeId, TypeKind};
use jeval_runtime::{ArrayRef, Value};

use super::convert_to;
use crate::errors::{
    class_cast, index_out_of_bounds, invariant_violation, negative_array_size, null_pointer,
    EvalResult,
};
use crate::numeric;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct ArrayEvaluator;

impl ExpressionEvaluator for ArrayEvaluator {
    fn name(&self) -> &'static str {
        "array"
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
        let array_type = tree.expr(expr).ty;
        let value = match tree.kind(expr) {
            ExprKind::ArrayCreation {
                initializer: Some(initializer),
                ..
            } => engine.evaluate(ctx, initializer)?,
            ExprKind::ArrayCreation { dimensions, .. } => {
                let sizes = tree
                    .list(dimensions)
                    .iter()
                    .map(|&dimension| {
                        let size = numeric::as_int(&engine.evaluate(ctx, dimension)?)?;
                        if size < 0 {
                            return Err(negative_array_size(size));
                        }
                        Ok(size as usize)
                    })
                    .collect::<EvalResult<Vec<usize>>>()?;
                allocate(ctx, array_type, &sizes)?
            }
            ExprKind::ArrayInitializer { elements } => {
                let component = component_of(ctx, array_type)?;
                let component = tree.type_binding(component);
                let values = tree
                    .list(elements)
                    .iter()
                    .map(|&element| convert_to(component, engine.evaluate(ctx, element)?))
                    .collect::<EvalResult<Vec<Value>>>()?;
                new_array(ctx, array_type, values)?
            }
            ExprKind::ArrayAccess { array, index } => {
                let array = engine.evaluate(ctx, array)?;
                let index = numeric::as_int(&engine.evaluate(ctx, index)?)?;
                load_element(&array, index)?
            }
            _ => return Ok(Evaluation::Unknown),
        };
        Ok(value.into())
    }
}

/// `new T[d0][d1]...[]`: the given dimensions are allocated, trailing
/// unspecified dimensions stay `null`.
fn allocate(ctx: &EvaluationContext<'_>, array_type: TypeId, sizes: &[usize]) -> EvalResult {
    let Some((&size, rest)) = sizes.split_first() else {
        return Ok(Value::Null);
    };
    let component = component_of(ctx, array_type)?;
    let elements = if rest.is_empty() {
        vec![Value::zero_for(&ctx.tree().binary_name(component)); size]
    } else {
        (0..size)
            .map(|_| allocate(ctx, component, rest))
            .collect::<EvalResult<Vec<Value>>>()?
    };
    new_array(ctx, array_type, elements)
}

fn new_array(ctx: &EvaluationContext<'_>, array_type: TypeId, elements: Vec<Value>) -> EvalResult {
    let class = ctx.load_class(&ctx.tree().binary_name(array_type))?;
    Ok(Value::Array(ArrayRef::new(class, elements)))
}

fn component_of(ctx: &EvaluationContext<'_>, array_type: TypeId) -> EvalResult<TypeId> {
    match ctx.tree().type_binding(array_type).kind {
        TypeKind::Array { component } => Ok(component),
        _ => Err(invariant_violation(format!(
            "{} is not an array type",
            ctx.tree().qualified_name(array_type)
        ))),
    }
}

fn array_ref<'v>(array: &'v Value) -> EvalResult<&'v ArrayRef> {
    match array {
        Value::Array(array) => Ok(array),
        Value::Null => Err(null_pointer("cannot index into a null array")),
        other => Err(class_cast(&other.class_name(), "java.lang.Object[]")),
    }
}

pub(super) fn load_element(array: &Value, index: i32) -> EvalResult {
    let array = array_ref(array)?;
    usize::try_from(index)
        .ok()
        .and_then(|i| array.get(i))
        .ok_or_else(|| index_out_of_bounds(index, array.len()))
}

pub(super) fn store_element(array: &Value, index: i32, value: Value) -> EvalResult<()> {
    let array = array_ref(array)?;
    let stored = usize::try_from(index).is_ok_and(|i| array.set(i, value));
    if stored {
        Ok(())
    } else {
        Err(index_out_of_bounds(index, array.len()))
    }
}
