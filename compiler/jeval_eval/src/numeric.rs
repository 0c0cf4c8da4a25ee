//! Java numeric semantics: literal parsing, binary numeric promotion and
//! fixed-width arithmetic.
//!
//! Integral arithmetic wraps (`wrapping_*`), division truncates toward zero
//! and `%` takes the sign of the dividend, exactly as Rust's signed integer
//! operators do. Shift distances are masked to the operand width.

use jeval_ir::{InfixOp, PrimitiveKind};
use jeval_runtime::Value;

use crate::errors::{
    class_cast, division_by_zero, invariant_violation, malformed_literal, null_pointer, EvalResult,
};

// Literals

/// Radix and digits of an integral literal, `_` separators and type suffix
/// already removed. Hex is checked before binary, binary before octal.
fn split_radix(digits: &str) -> (u32, &str) {
    if let Some(rest) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, rest)
    } else if let Some(rest) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, rest)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    }
}

fn clean_token(token: &str, suffixes: &[char]) -> String {
    let trimmed = token.strip_suffix(suffixes).unwrap_or(token);
    trimmed.chars().filter(|&c| c != '_').collect()
}

/// Magnitude of an integral literal of `bits` width. Decimal literals may
/// reach `2^(bits-1)` (only legal as the operand of unary minus); other
/// radixes cover the full unsigned range.
fn parse_integral(token: &str, bits: u32, suffixes: &[char]) -> EvalResult<(u64, u32)> {
    let cleaned = clean_token(token, suffixes);
    let (radix, digits) = split_radix(&cleaned);
    if digits.is_empty() {
        return Err(malformed_literal(token));
    }
    let value = u64::from_str_radix(digits, radix).map_err(|_| malformed_literal(token))?;
    let max = if radix == 10 {
        1u64 << (bits - 1)
    } else {
        u64::MAX >> (64 - bits)
    };
    if value > max {
        return Err(malformed_literal(token));
    }
    Ok((value, radix))
}

pub(crate) fn parse_int(token: &str) -> EvalResult<i32> {
    match parse_integral(token, 32, &[])? {
        (value, 10) if value > i32::MAX as u64 => Err(malformed_literal(token)),
        (value, _) => Ok(value as u32 as i32),
    }
}

pub(crate) fn parse_long(token: &str) -> EvalResult<i64> {
    match parse_integral(token, 64, &['L', 'l'])? {
        (value, 10) if value > i64::MAX as u64 => Err(malformed_literal(token)),
        (value, _) => Ok(value as i64),
    }
}

/// True for the decimal literal `2147483648` (or `9223372036854775808L`),
/// which only exists as the operand of unary minus.
pub(crate) fn is_min_magnitude(token: &str, bits: u32) -> bool {
    let suffixes: &[char] = if bits == 64 { &['L', 'l'] } else { &[] };
    matches!(parse_integral(token, bits, suffixes), Ok((value, 10)) if value == 1u64 << (bits - 1))
}

pub(crate) fn parse_float(token: &str) -> EvalResult<f32> {
    let cleaned = clean_token(token, &['F', 'f']);
    if is_hex(&cleaned) {
        let (bits, exponent) = split_hex_floating(&cleaned).ok_or_else(|| malformed_literal(token))?;
        return Ok(scale(f64::from(bits as f32), exponent) as f32);
    }
    cleaned.parse::<f32>().map_err(|_| malformed_literal(token))
}

pub(crate) fn parse_double(token: &str) -> EvalResult<f64> {
    let cleaned = clean_token(token, &['D', 'd']);
    if is_hex(&cleaned) {
        let (bits, exponent) = split_hex_floating(&cleaned).ok_or_else(|| malformed_literal(token))?;
        return Ok(scale(bits as f64, exponent));
    }
    cleaned.parse::<f64>().map_err(|_| malformed_literal(token))
}

fn is_hex(cleaned: &str) -> bool {
    cleaned.starts_with("0x") || cleaned.starts_with("0X")
}

/// Significand bits and binary exponent of `0x<digits>[.<digits>]p<exp>`.
/// Digits past 60 significant bits fold into the lowest bit so rounding
/// still sees them.
fn split_hex_floating(cleaned: &str) -> Option<(u64, i32)> {
    let body = cleaned.get(2..)?;
    let (mantissa, exponent) = body.split_once(['p', 'P'])?;
    let mut exponent: i32 = exponent.parse().ok()?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let mut bits = 0u64;
    let mut sticky = false;
    for (index, c) in whole.chars().chain(fraction.chars()).enumerate() {
        let digit = u64::from(c.to_digit(16)?);
        let in_fraction = index >= whole.len();
        if bits < 1 << 56 {
            bits = (bits << 4) | digit;
            if in_fraction {
                exponent = exponent.checked_sub(4)?;
            }
        } else {
            sticky |= digit != 0;
            if !in_fraction {
                exponent = exponent.checked_add(4)?;
            }
        }
    }
    Some((bits | u64::from(sticky), exponent))
}

/// `value * 2^exponent`, split so the intermediate power stays finite.
fn scale(value: f64, exponent: i32) -> f64 {
    let half = exponent / 2;
    value * 2f64.powi(half) * 2f64.powi(exponent - half)
}

// Operands

/// Failure for a value used where a number was expected. Unboxing `null`
/// throws `NullPointerException`.
#[cold]
pub(crate) fn not_a_number(value: &Value) -> crate::EvalError {
    if value.is_null() {
        null_pointer("unboxing a null value")
    } else {
        class_cast(&value.class_name(), "java.lang.Number")
    }
}

/// Kind of a numeric or `char` value; booleans and references are not.
pub(crate) fn numeric_kind(value: &Value) -> Option<PrimitiveKind> {
    value.primitive_kind().filter(|kind| kind.is_numeric())
}

/// JLS 5.6.1: `byte`, `short` and `char` promote to `int`.
pub(crate) fn unary_promotion(kind: PrimitiveKind) -> PrimitiveKind {
    match kind {
        PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Char => PrimitiveKind::Int,
        other => other,
    }
}

/// JLS 5.6.2 binary numeric promotion.
pub(crate) fn binary_promotion(a: &Value, b: &Value) -> Option<PrimitiveKind> {
    let (a, b) = (numeric_kind(a)?, numeric_kind(b)?);
    Some(if a == PrimitiveKind::Double || b == PrimitiveKind::Double {
        PrimitiveKind::Double
    } else if a == PrimitiveKind::Float || b == PrimitiveKind::Float {
        PrimitiveKind::Float
    } else if a == PrimitiveKind::Long || b == PrimitiveKind::Long {
        PrimitiveKind::Long
    } else {
        PrimitiveKind::Int
    })
}

// Arithmetic

#[cold]
fn undefined_operator(op: InfixOp, type_name: &str) -> crate::EvalError {
    invariant_violation(format!(
        "operator {} is not defined on {type_name}",
        op.as_symbol()
    ))
}

pub(crate) fn int_arith(op: InfixOp, a: i32, b: i32) -> EvalResult<i32> {
    Ok(match op {
        InfixOp::Add => a.wrapping_add(b),
        InfixOp::Sub => a.wrapping_sub(b),
        InfixOp::Mul => a.wrapping_mul(b),
        InfixOp::Div if b == 0 => return Err(division_by_zero()),
        InfixOp::Div => a.wrapping_div(b),
        InfixOp::Rem if b == 0 => return Err(division_by_zero()),
        InfixOp::Rem => a.wrapping_rem(b),
        InfixOp::BitAnd => a & b,
        InfixOp::BitOr => a | b,
        InfixOp::BitXor => a ^ b,
        InfixOp::Shl => a.wrapping_shl(b as u32),
        InfixOp::Shr => a.wrapping_shr(b as u32),
        InfixOp::UShr => (a as u32).wrapping_shr(b as u32) as i32,
        _ => return Err(undefined_operator(op, "int")),
    })
}

pub(crate) fn long_arith(op: InfixOp, a: i64, b: i64) -> EvalResult<i64> {
    Ok(match op {
        InfixOp::Add => a.wrapping_add(b),
        InfixOp::Sub => a.wrapping_sub(b),
        InfixOp::Mul => a.wrapping_mul(b),
        InfixOp::Div if b == 0 => return Err(division_by_zero()),
        InfixOp::Div => a.wrapping_div(b),
        InfixOp::Rem if b == 0 => return Err(division_by_zero()),
        InfixOp::Rem => a.wrapping_rem(b),
        InfixOp::BitAnd => a & b,
        InfixOp::BitOr => a | b,
        InfixOp::BitXor => a ^ b,
        InfixOp::Shl => a.wrapping_shl(b as u32),
        InfixOp::Shr => a.wrapping_shr(b as u32),
        InfixOp::UShr => (a as u64).wrapping_shr(b as u32) as i64,
        _ => return Err(undefined_operator(op, "long")),
    })
}

pub(crate) fn float_arith(op: InfixOp, a: f32, b: f32) -> EvalResult<f32> {
    Ok(match op {
        InfixOp::Add => a + b,
        InfixOp::Sub => a - b,
        InfixOp::Mul => a * b,
        InfixOp::Div => a / b,
        InfixOp::Rem => a % b,
        _ => return Err(undefined_operator(op, "float")),
    })
}

pub(crate) fn double_arith(op: InfixOp, a: f64, b: f64) -> EvalResult<f64> {
    Ok(match op {
        InfixOp::Add => a + b,
        InfixOp::Sub => a - b,
        InfixOp::Mul => a * b,
        InfixOp::Div => a / b,
        InfixOp::Rem => a % b,
        _ => return Err(undefined_operator(op, "double")),
    })
}

/// `a op b` with Java's promotion rules, for operands whose static types
/// are only known at runtime (compound assignment, mixed string chains).
/// Shifts promote each operand separately and take the left operand's type.
pub(crate) fn binary(op: InfixOp, a: &Value, b: &Value) -> EvalResult<Value> {
    if let (Value::Boolean(x), Value::Boolean(y)) = (a, b) {
        return match op {
            InfixOp::BitAnd | InfixOp::And => Ok(Value::Boolean(*x & *y)),
            InfixOp::BitOr | InfixOp::Or => Ok(Value::Boolean(*x | *y)),
            InfixOp::BitXor => Ok(Value::Boolean(*x ^ *y)),
            InfixOp::Eq => Ok(Value::Boolean(x == y)),
            InfixOp::NotEq => Ok(Value::Boolean(x != y)),
            _ => Err(undefined_operator(op, "boolean")),
        };
    }
    if op.is_relational() || matches!(op, InfixOp::Eq | InfixOp::NotEq) {
        return compare(op, a, b).map(Value::Boolean);
    }
    let kind = if op.is_shift() {
        numeric_kind(b).ok_or_else(|| not_a_number(b))?;
        unary_promotion(numeric_kind(a).ok_or_else(|| not_a_number(a))?)
    } else {
        binary_promotion(a, b).ok_or_else(|| {
            if numeric_kind(a).is_none() {
                not_a_number(a)
            } else {
                not_a_number(b)
            }
        })?
    };
    arith_in(kind, op, a, b)
}

/// Arithmetic with both operands converted to `kind`.
pub(crate) fn arith_in(kind: PrimitiveKind, op: InfixOp, a: &Value, b: &Value) -> EvalResult<Value> {
    match kind {
        PrimitiveKind::Long => {
            let (x, y) = (as_long(a)?, as_long(b)?);
            long_arith(op, x, y).map(Value::Long)
        }
        PrimitiveKind::Float => {
            let (x, y) = (as_float(a)?, as_float(b)?);
            float_arith(op, x, y).map(Value::Float)
        }
        PrimitiveKind::Double => {
            let (x, y) = (as_double(a)?, as_double(b)?);
            double_arith(op, x, y).map(Value::Double)
        }
        _ => {
            let (x, y) = (as_int(a)?, as_int(b)?);
            int_arith(op, x, y).map(Value::Int)
        }
    }
}

/// Relational or equality comparison after binary numeric promotion.
pub(crate) fn compare(op: InfixOp, a: &Value, b: &Value) -> EvalResult<bool> {
    let kind = binary_promotion(a, b).ok_or_else(|| {
        if numeric_kind(a).is_none() {
            not_a_number(a)
        } else {
            not_a_number(b)
        }
    })?;
    let ordering = match kind {
        PrimitiveKind::Double => as_double(a)?.partial_cmp(&as_double(b)?),
        PrimitiveKind::Float => as_float(a)?.partial_cmp(&as_float(b)?),
        _ => Some(as_long(a)?.cmp(&as_long(b)?)),
    };
    // NaN compares false for everything except `!=`.
    let Some(ordering) = ordering else {
        return Ok(op == InfixOp::NotEq);
    };
    Ok(match op {
        InfixOp::Lt => ordering.is_lt(),
        InfixOp::Gt => ordering.is_gt(),
        InfixOp::LtEq => ordering.is_le(),
        InfixOp::GtEq => ordering.is_ge(),
        InfixOp::Eq => ordering.is_eq(),
        InfixOp::NotEq => ordering.is_ne(),
        _ => return Err(undefined_operator(op, "a comparison")),
    })
}

/// `value ± 1` in the variable's own type: `byte`, `short` and `char`
/// wrap within their width.
pub(crate) fn step(value: &Value, kind: PrimitiveKind, delta: i32) -> EvalResult<Value> {
    let stepped = match kind {
        PrimitiveKind::Long => Value::Long(as_long(value)?.wrapping_add(i64::from(delta))),
        PrimitiveKind::Float => Value::Float(as_float(value)? + delta as f32),
        PrimitiveKind::Double => Value::Double(as_double(value)? + f64::from(delta)),
        PrimitiveKind::Int => Value::Int(as_int(value)?.wrapping_add(delta)),
        PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Char => {
            let wide = Value::Int(as_int(value)?.wrapping_add(delta));
            return wide
                .cast_to(kind)
                .ok_or_else(|| class_cast(&value.class_name(), kind.name()));
        }
        PrimitiveKind::Boolean | PrimitiveKind::Void => {
            return Err(invariant_violation(format!(
                "increment is not defined on {}",
                kind.name()
            )))
        }
    };
    Ok(stepped)
}

pub(crate) fn as_int(value: &Value) -> EvalResult<i32> {
    numeric_kind(value)
        .and_then(|_| value.as_i32())
        .ok_or_else(|| not_a_number(value))
}

pub(crate) fn as_long(value: &Value) -> EvalResult<i64> {
    numeric_kind(value)
        .and_then(|_| value.as_i64())
        .ok_or_else(|| not_a_number(value))
}

pub(crate) fn as_float(value: &Value) -> EvalResult<f32> {
    numeric_kind(value)
        .and_then(|_| value.as_f32())
        .ok_or_else(|| not_a_number(value))
}

pub(crate) fn as_double(value: &Value) -> EvalResult<f64> {
    numeric_kind(value)
        .and_then(|_| value.as_f64())
        .ok_or_else(|| not_a_number(value))
}
