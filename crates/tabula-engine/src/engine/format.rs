//! Display formatting for computed results and literal input.

/// Format a computed formula result for display.
///
/// Whole numbers render without a decimal point; everything else keeps at
/// most six fractional digits, trailing zeros trimmed.
pub fn format_number(n: f64) -> String {
    let n = if n == 0.0 { 0.0 } else { n };
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        let fixed = format!("{n:.6}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Normalize plain (non-formula) literal input for display.
///
/// Integral numeric literals drop their decimal point and leading zeros
/// ("007" -> "7"); other numeric literals take the default float rendering;
/// anything else passes through verbatim.
pub fn normalize_literal(input: &str) -> String {
    match input.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => {
            let n = if n == 0.0 { 0.0 } else { n };
            if n.fract() == 0.0 {
                format!("{n:.0}")
            } else {
                n.to_string()
            }
        }
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_numbers() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e15), "1000000000000000");
    }

    #[test]
    fn test_format_fractions_trim_trailing_zeros() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(2.570), "2.57");
    }

    #[test]
    fn test_normalize_integral_literals() {
        assert_eq!(normalize_literal("007"), "7");
        assert_eq!(normalize_literal("42"), "42");
        assert_eq!(normalize_literal("  42  "), "42");
        assert_eq!(normalize_literal("-0"), "0");
        assert_eq!(normalize_literal("5.0"), "5");
    }

    #[test]
    fn test_normalize_fractional_literals() {
        assert_eq!(normalize_literal("3.140"), "3.14");
        assert_eq!(normalize_literal(".5"), "0.5");
    }

    #[test]
    fn test_normalize_passes_text_through() {
        assert_eq!(normalize_literal("hello"), "hello");
        assert_eq!(normalize_literal(""), "");
        assert_eq!(normalize_literal("inf"), "inf");
        assert_eq!(normalize_literal("NaN"), "NaN");
        assert_eq!(normalize_literal("12px"), "12px");
    }
}
