//! Runtime values of the Java expression evaluator.
//!
//! Java primitives are held inline. Boxed and unboxed forms share one
//! representation: reflection boxes primitives implicitly, so an `Int` is
//! both an `int` and a `java.lang.Integer`. Strings, arrays, objects and
//! class objects are reference-counted.
//!
//! `null` is [`Value::Null`]; the evaluator's "not mine" signal is a separate
//! type and never a `Value`.

pub(crate) mod convert;
mod format;
mod heap;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use jeval_ir::PrimitiveKind;

pub use format::{format_double, format_float};
pub use heap::Heap;

use crate::class::ClassRef;
use crate::object::{ArrayRef, ObjectRef};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// The Java `null` reference.
    Null,
    Boolean(bool),
    /// UTF-16 code unit.
    Char(u16),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(Heap<str>),
    Array(ArrayRef),
    Object(ObjectRef),
    /// A `java.lang.Class` object.
    Class(ClassRef),
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Heap::from_arc(Arc::from(s.as_ref())))
    }

    #[inline]
    pub fn char(c: char) -> Self {
        let mut units = [0u16; 2];
        Value::Char(c.encode_utf16(&mut units)[0])
    }

    /// Zero value of a declared type: `0`, `false`, `'\0'` for primitives,
    /// `null` for references and `void`.
    pub fn zero_for(type_name: &str) -> Self {
        match PrimitiveKind::from_name(type_name) {
            Some(kind) => Self::zero_of(kind),
            None => Value::Null,
        }
    }

    pub fn zero_of(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => Value::Boolean(false),
            PrimitiveKind::Char => Value::Char(0),
            PrimitiveKind::Byte => Value::Byte(0),
            PrimitiveKind::Short => Value::Short(0),
            PrimitiveKind::Int => Value::Int(0),
            PrimitiveKind::Long => Value::Long(0),
            PrimitiveKind::Float => Value::Float(0.0),
            PrimitiveKind::Double => Value::Double(0.0),
            PrimitiveKind::Void => Value::Null,
        }
    }
}

// Accessors

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub fn as_class(&self) -> Option<&ClassRef> {
        match self {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Primitive kind of an inline value.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            Value::Boolean(_) => PrimitiveKind::Boolean,
            Value::Char(_) => PrimitiveKind::Char,
            Value::Byte(_) => PrimitiveKind::Byte,
            Value::Short(_) => PrimitiveKind::Short,
            Value::Int(_) => PrimitiveKind::Int,
            Value::Long(_) => PrimitiveKind::Long,
            Value::Float(_) => PrimitiveKind::Float,
            Value::Double(_) => PrimitiveKind::Double,
            _ => return None,
        })
    }

    /// True for `Number` values (excludes `char` and `boolean`).
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::Short(_)
                | Value::Int(_)
                | Value::Long(_)
                | Value::Float(_)
                | Value::Double(_)
        )
    }

    /// Binary name of the value's runtime class (`java.lang.Integer` for an
    /// `Int`, `null` for the null reference).
    pub fn class_name(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Str(_) => Cow::Borrowed("java.lang.String"),
            Value::Array(array) => Cow::Owned(array.class().name().to_string()),
            Value::Object(object) => Cow::Owned(object.class().name().to_string()),
            Value::Class(_) => Cow::Borrowed("java.lang.Class"),
            primitive => Cow::Borrowed(
                primitive
                    .primitive_kind()
                    .map_or("java.lang.Object", PrimitiveKind::wrapper_class),
            ),
        }
    }

    /// Identity hash for reference values, value hash for inline ones.
    pub fn identity_hash(&self) -> u32 {
        match self {
            Value::Object(object) => object.identity_hash(),
            Value::Array(array) => array.identity_hash(),
            Value::Class(class) => {
                // Address-derived identity; truncation is intended.
                (Arc::as_ptr(class) as usize as u32).rotate_left(7)
            }
            Value::Str(s) => java_string_hash(s),
            Value::Null => 0,
            other => other.as_i64().unwrap_or(0) as u32,
        }
    }
}

/// `String.hashCode`.
pub fn java_string_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

impl PartialEq for Value {
    /// Java `equals` for boxed values and strings, identity for objects and
    /// arrays. Floating-point values compare by bits, so `NaN` equals `NaN`
    /// and `0.0` differs from `-0.0`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::Double(a), Value::Double(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::Str(a), Value::Str(b)) => **a == **b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Class(a), Value::Class(b)) => Arc::ptr_eq(a, b) || a.name() == b.name(),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Char(c) => write!(f, "Char({:?})", char_display(*c)),
            Value::Byte(n) => write!(f, "Byte({n})"),
            Value::Short(n) => write!(f, "Short({n})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Long(n) => write!(f, "Long({n})"),
            Value::Float(n) => write!(f, "Float({})", format_float(*n)),
            Value::Double(n) => write!(f, "Double({})", format_double(*n)),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Array(a) => write!(f, "Array({})", a.class().name()),
            Value::Object(o) => write!(f, "Object({}@{:x})", o.class().name(), o.identity_hash()),
            Value::Class(c) => write!(f, "Class({})", c.name()),
        }
    }
}

/// `String.valueOf` for everything that needs no method call. Objects print
/// with the default `Object.toString` form; use
/// [`crate::reflect::to_java_string`] to honor `toString()` overrides.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{}", char_display(*c)),
            Value::Byte(n) => write!(f, "{n}"),
            Value::Short(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&format_float(*n)),
            Value::Double(n) => f.write_str(&format_double(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Array(a) => write!(f, "{}@{:x}", a.class().name(), a.identity_hash()),
            Value::Object(o) => write!(f, "{}@{:x}", o.class().name(), o.identity_hash()),
            Value::Class(c) => {
                let prefix = if c.is_interface() { "interface" } else { "class" };
                write!(f, "{prefix} {}", c.name())
            }
        }
    }
}

/// Display form of a UTF-16 code unit; lone surrogates become U+FFFD.
pub fn char_display(unit: u16) -> char {
    char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
}
