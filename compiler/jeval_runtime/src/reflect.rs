//! Reflective helpers: assignability, argument coercion, `toString`,
//! `equals`, and the per-session member cache.

use std::sync::Arc;

use dashmap::DashMap;
use jeval_ir::{MemberKey, PrimitiveKind};
use rustc_hash::FxBuildHasher;

use crate::class::{ClassRef, ConstructorDef, MethodDef};
use crate::errors::Throwable;
use crate::value::{convert::widens, Value};

/// Supertypes of values whose class is implied by their representation.
fn builtin_supertypes(value: &Value) -> &'static [&'static str] {
    match value {
        Value::Str(_) => &[
            "java.lang.String",
            "java.lang.CharSequence",
            "java.lang.Comparable",
            "java.io.Serializable",
        ],
        Value::Boolean(_) => &["java.lang.Boolean", "java.lang.Comparable", "java.io.Serializable"],
        Value::Char(_) => &["java.lang.Character", "java.lang.Comparable", "java.io.Serializable"],
        Value::Byte(_) => &["java.lang.Byte", "java.lang.Number", "java.lang.Comparable", "java.io.Serializable"],
        Value::Short(_) => &["java.lang.Short", "java.lang.Number", "java.lang.Comparable", "java.io.Serializable"],
        Value::Int(_) => &["java.lang.Integer", "java.lang.Number", "java.lang.Comparable", "java.io.Serializable"],
        Value::Long(_) => &["java.lang.Long", "java.lang.Number", "java.lang.Comparable", "java.io.Serializable"],
        Value::Float(_) => &["java.lang.Float", "java.lang.Number", "java.lang.Comparable", "java.io.Serializable"],
        Value::Double(_) => &["java.lang.Double", "java.lang.Number", "java.lang.Comparable", "java.io.Serializable"],
        Value::Class(_) => &["java.lang.Class", "java.io.Serializable"],
        Value::Null | Value::Array(_) | Value::Object(_) => &[],
    }
}

/// `Class.isInstance` by type name. `null` is an instance of no type.
pub fn is_instance(value: &Value, type_name: &str) -> bool {
    match value {
        Value::Null => false,
        Value::Object(object) => object.class().is_subtype_of(type_name),
        Value::Array(array) => array.class().is_subtype_of(type_name),
        other => type_name == "java.lang.Object" || builtin_supertypes(other).contains(&type_name),
    }
}

/// Convert an argument for a parameter of type `type_name` the way
/// `Method.invoke` does: unboxing plus widening for primitive parameters,
/// an instance check for reference parameters. `None` means the argument is
/// not acceptable.
pub fn coerce_argument(value: &Value, type_name: &str) -> Option<Value> {
    if let Some(kind) = PrimitiveKind::from_name(type_name) {
        return value.widen_to(kind);
    }
    if value.is_null() || is_instance(value, type_name) {
        Some(value.clone())
    } else {
        None
    }
}

/// True when `value` could be passed for a parameter of `type_name`.
pub fn is_assignable(value: &Value, type_name: &str) -> bool {
    coerce_argument(value, type_name).is_some()
}

/// True when a primitive of kind `from` widens to `to`.
pub fn primitive_widens(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    from == to || widens(from, to)
}

fn object_method_override(class: &ClassRef, key: &MemberKey) -> Option<Arc<MethodDef>> {
    class
        .find_method(key)
        .filter(|m| m.declaring_class() != "java.lang.Object" && !m.is_abstract())
}

/// `String.valueOf(value)`, calling a `toString()` override when the
/// object's class declares one.
pub fn to_java_string(value: &Value) -> Result<String, Throwable> {
    if let Value::Object(object) = value {
        let key = MemberKey::new("toString", Vec::<String>::new());
        if let Some(method) = object_method_override(object.class(), &key) {
            return match method.invoke(value, &[]) {
                Ok(Value::Null) => Ok("null".to_string()),
                Ok(result) => Ok(result.to_string()),
                Err(err) => Err(err.to_throwable()),
            };
        }
    }
    Ok(value.to_string())
}

/// `Objects.equals(a, b)`, calling an `equals(Object)` override when the
/// left operand's class declares one.
pub fn java_equals(a: &Value, b: &Value) -> Result<bool, Throwable> {
    if let Value::Object(object) = a {
        let key = MemberKey::new("equals", ["java.lang.Object"]);
        if let Some(method) = object_method_override(object.class(), &key) {
            return match method.invoke(a, std::slice::from_ref(b)) {
                Ok(Value::Boolean(result)) => Ok(result),
                Ok(other) => Err(Throwable::illegal_state(format!(
                    "equals returned {other:?} instead of a boolean"
                ))),
                Err(err) => Err(err.to_throwable()),
            };
        }
    }
    Ok(a == b)
}

type MemberSlot<T> = DashMap<(String, MemberKey), Option<Arc<T>>, FxBuildHasher>;

/// Per-session cache of member lookups keyed by class name and member key.
///
/// Misses are cached too. Population is idempotent: two lookups racing on
/// the same key compute the same answer and the first insert wins.
#[derive(Default)]
pub struct MemberCache {
    methods: MemberSlot<MethodDef>,
    constructors: MemberSlot<ConstructorDef>,
}

impl MemberCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached [`crate::JavaClass::find_method`].
    pub fn method(&self, class: &ClassRef, key: &MemberKey) -> Option<Arc<MethodDef>> {
        let slot = (class.name().to_string(), key.clone());
        if let Some(hit) = self.methods.get(&slot) {
            return hit.value().clone();
        }
        let found = class.find_method(key);
        self.methods.entry(slot).or_insert(found).value().clone()
    }

    /// Cached [`crate::JavaClass::find_constructor`].
    pub fn constructor(&self, class: &ClassRef, key: &MemberKey) -> Option<Arc<ConstructorDef>> {
        let slot = (class.name().to_string(), key.clone());
        if let Some(hit) = self.constructors.get(&slot) {
            return hit.value().clone();
        }
        let found = class.find_constructor(key);
        self.constructors.entry(slot).or_insert(found).value().clone()
    }

    /// Number of cached lookups, hits and misses alike.
    pub fn len(&self) -> usize {
        self.methods.len() + self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.methods.clear();
        self.constructors.clear();
    }
}

impl std::fmt::Debug for MemberCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberCache")
            .field("methods", &self.methods.len())
            .field("constructors", &self.constructors.len())
            .finish()
    }
}
