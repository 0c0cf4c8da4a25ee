//! Java primitive conversions.
//!
//! `as_*` apply casting conversion (narrowing truncates, floating to integral
//! saturates and maps `NaN` to zero, exactly what Rust's `as` does).
//! [`Value::widen_to`] only allows the implicit widening conversions used
//! for reflective argument passing.

use jeval_ir::PrimitiveKind;

use super::Value;

impl Value {
    /// `int` view of a numeric or `char` value.
    pub fn as_i32(&self) -> Option<i32> {
        Some(match *self {
            Value::Char(c) => i32::from(c),
            Value::Byte(n) => i32::from(n),
            Value::Short(n) => i32::from(n),
            Value::Int(n) => n,
            Value::Long(n) => n as i32,
            Value::Float(n) => n as i32,
            Value::Double(n) => n as i32,
            _ => return None,
        })
    }

    pub fn as_i64(&self) -> Option<i64> {
        Some(match *self {
            Value::Char(c) => i64::from(c),
            Value::Byte(n) => i64::from(n),
            Value::Short(n) => i64::from(n),
            Value::Int(n) => i64::from(n),
            Value::Long(n) => n,
            Value::Float(n) => n as i64,
            Value::Double(n) => n as i64,
            _ => return None,
        })
    }

    pub fn as_f32(&self) -> Option<f32> {
        Some(match *self {
            Value::Char(c) => f32::from(c),
            Value::Byte(n) => f32::from(n),
            Value::Short(n) => f32::from(n),
            Value::Int(n) => n as f32,
            Value::Long(n) => n as f32,
            Value::Float(n) => n,
            Value::Double(n) => n as f32,
            _ => return None,
        })
    }

    pub fn as_f64(&self) -> Option<f64> {
        Some(match *self {
            Value::Char(c) => f64::from(c),
            Value::Byte(n) => f64::from(n),
            Value::Short(n) => f64::from(n),
            Value::Int(n) => f64::from(n),
            Value::Long(n) => n as f64,
            Value::Float(n) => f64::from(n),
            Value::Double(n) => n,
            _ => return None,
        })
    }

    /// Casting conversion to a primitive kind. `boolean` only converts from
    /// `boolean`; `void` never converts.
    pub fn cast_to(&self, kind: PrimitiveKind) -> Option<Value> {
        Some(match kind {
            PrimitiveKind::Boolean => Value::Boolean(self.as_bool()?),
            PrimitiveKind::Char => Value::Char(self.as_i32()? as u16),
            PrimitiveKind::Byte => Value::Byte(self.as_i32()? as i8),
            PrimitiveKind::Short => Value::Short(self.as_i32()? as i16),
            PrimitiveKind::Int => Value::Int(self.as_i32()?),
            PrimitiveKind::Long => Value::Long(self.as_i64()?),
            PrimitiveKind::Float => Value::Float(self.as_f32()?),
            PrimitiveKind::Double => Value::Double(self.as_f64()?),
            PrimitiveKind::Void => return None,
        })
    }

    /// Widening primitive conversion, or identity.
    pub fn widen_to(&self, kind: PrimitiveKind) -> Option<Value> {
        let from = self.primitive_kind()?;
        if from == kind {
            return Some(self.clone());
        }
        if widens(from, kind) {
            self.cast_to(kind)
        } else {
            None
        }
    }
}

/// JLS 5.1.2 widening primitive conversions.
pub(crate) fn widens(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    use PrimitiveKind::{Byte, Char, Double, Float, Int, Long, Short};
    matches!(
        (from, to),
        (Byte, Short | Int | Long | Float | Double)
            | (Short | Char, Int | Long | Float | Double)
            | (Int, Long | Float | Double)
            | (Long, Float | Double)
            | (Float, Double)
    )
}
