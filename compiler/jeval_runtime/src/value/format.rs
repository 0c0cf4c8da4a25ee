//! Java `String.valueOf` formatting for floating-point values.
//!
//! Magnitudes in `[1e-3, 1e7)` print as plain decimals with at least one
//! fractional digit; everything else uses `d.dddE[-]n`. Digits are the
//! shortest representation that round-trips, which is what the JDK prints.

/// Format a `double` the way `Double.toString` does.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        plain(format!("{value}"))
    } else {
        scientific(&format!("{value:e}"))
    }
}

/// Format a `float` the way `Float.toString` does.
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        plain(format!("{value}"))
    } else {
        scientific(&format!("{value:e}"))
    }
}

fn plain(mut digits: String) -> String {
    if !digits.contains('.') {
        digits.push_str(".0");
    }
    digits
}

fn scientific(rust: &str) -> String {
    let (mantissa, exponent) = rust.split_once('e').unwrap_or((rust, "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_range() {
        assert_eq!(format_double(1.0), "1.0");
        assert_eq!(format_double(-2.5), "-2.5");
        assert_eq!(format_double(0.001), "0.001");
        assert_eq!(format_double(1_234_567.0), "1234567.0");
        assert_eq!(format_double(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn scientific_range() {
        assert_eq!(format_double(1e7), "1.0E7");
        assert_eq!(format_double(1.5e10), "1.5E10");
        assert_eq!(format_double(1e-4), "1.0E-4");
        assert_eq!(format_double(-3.25e-5), "-3.25E-5");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_double(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_double(-0.0), "-0.0");
        assert_eq!(format_float(0.0), "0.0");
    }

    #[test]
    fn float_uses_single_precision_digits() {
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(3.0e10), "3.0E10");
    }

    mod proptest_format {
        use super::super::format_double;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn double_output_round_trips(value in proptest::num::f64::NORMAL) {
                let text = format_double(value).replace('E', "e");
                prop_assert_eq!(text.parse::<f64>().ok(), Some(value));
            }
        }
    }
}
