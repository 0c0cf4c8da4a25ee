//! The standard evaluator chain.
//!
//! Type-driven evaluators (one per primitive family plus `String` and
//! `Class`) claim an expression by its static type name; structural
//! evaluators claim by node kind. Order matters only where both could claim
//! the same node, so the type-driven ones come first.

mod arithmetic;
mod array;
mod assignment;
mod boolean;
mod cast;
mod character;
mod class;
mod conditional;
mod double;
mod field_access;
mod fields;
mod float;
mod integer;
mod long;
mod qualified_name;
mod simple_name;
mod string;

pub use array::ArrayEvaluator;
pub use assignment::AssignmentEvaluator;
pub use boolean::BooleanEvaluator;
pub use cast::CastEvaluator;
pub use character::CharEvaluator;
pub use class::ClassEvaluator;
pub use conditional::ConditionalEvaluator;
pub use double::DoubleEvaluator;
pub use field_access::FieldAccessEvaluator;
pub use float::FloatEvaluator;
pub use integer::IntegerEvaluator;
pub use long::LongEvaluator;
pub use qualified_name::QualifiedNameEvaluator;
pub use simple_name::SimpleNameEvaluator;
pub use string::StringEvaluator;

use jeval_ir::TypeBinding;
use jeval_runtime::{reflect, Value};

use crate::errors::{class_cast, java_exception, null_pointer, EvalResult};
use crate::invocation::InvocationEvaluator;
use crate::ExpressionEvaluator;

/// The built-in chain in consultation order.
pub fn standard_evaluators() -> Vec<Box<dyn ExpressionEvaluator>> {
    vec![
        Box::new(IntegerEvaluator),
        Box::new(LongEvaluator),
        Box::new(FloatEvaluator),
        Box::new(DoubleEvaluator),
        Box::new(BooleanEvaluator),
        Box::new(CharEvaluator),
        Box::new(StringEvaluator),
        Box::new(ClassEvaluator),
        Box::new(CastEvaluator),
        Box::new(ConditionalEvaluator),
        Box::new(AssignmentEvaluator),
        Box::new(ArrayEvaluator),
        Box::new(FieldAccessEvaluator),
        Box::new(QualifiedNameEvaluator),
        Box::new(SimpleNameEvaluator),
        Box::new(InvocationEvaluator),
    ]
}

/// Unbox a `boolean` operand.
pub(crate) fn as_boolean(value: &Value) -> EvalResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Null => Err(null_pointer("cannot unbox null value as boolean")),
        other => Err(class_cast(&other.class_name(), "java.lang.Boolean")),
    }
}

/// `String.valueOf(value)`, honoring `toString()` overrides.
pub(crate) fn stringify(value: &Value) -> EvalResult<String> {
    match value {
        Value::Str(s) => Ok(s.to_string()),
        other => reflect::to_java_string(other).map_err(java_exception),
    }
}

/// Bring a value to the static type of the expression producing it:
/// primitive types convert (assignment and conditional contexts), reference
/// types pass through.
pub(crate) fn convert_to(ty: &TypeBinding, value: Value) -> EvalResult<Value> {
    match ty.primitive_kind() {
        Some(kind) if kind != jeval_ir::PrimitiveKind::Void => {
            if value.is_null() {
                return Err(null_pointer(&format!("cannot unbox null value as {}", kind.name())));
            }
            value
                .cast_to(kind)
                .ok_or_else(|| class_cast(&value.class_name(), kind.name()))
        }
        _ => Ok(value),
    }
}
