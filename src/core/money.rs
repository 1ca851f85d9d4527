//! Monetary parsing, rounding, and formatting.
//!
//! Everything in extraction and validation goes through [`Decimal`];
//! floating point is never used for comparison or summation.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Lenient numeric parse: any unparseable, empty, or malformed numeral
/// becomes `0.00` instead of an error.
///
/// This is a deliberate policy so a single missing field does not abort the
/// whole report. It also means a typo'd amount silently becomes zero — the
/// checklist surfaces the resulting arithmetic mismatch rather than the
/// parse itself.
pub fn parse_money_or_default(s: &str) -> Decimal {
    Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO)
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Format a Decimal for display/export — always include at least 2 decimal
/// places, keep extra precision when present.
pub fn format_amount(d: Decimal) -> String {
    let s = d.normalize().to_string();
    if let Some(dot_pos) = s.find('.') {
        let decimals = s.len() - dot_pos - 1;
        if decimals < 2 {
            format!("{s}{}", "0".repeat(2 - decimals))
        } else {
            s
        }
    } else {
        format!("{s}.00")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lenient_parse_defaults_to_zero() {
        assert_eq!(parse_money_or_default("123.45"), dec!(123.45));
        assert_eq!(parse_money_or_default(" 10.5 "), dec!(10.5));
        assert_eq!(parse_money_or_default(""), Decimal::ZERO);
        assert_eq!(parse_money_or_default("abc"), Decimal::ZERO);
        assert_eq!(parse_money_or_default("12,34"), Decimal::ZERO);
        assert_eq!(parse_money_or_default("-7.00"), dec!(-7.00));
    }

    #[test]
    fn half_up_rounds_midpoints_up() {
        assert_eq!(round_half_up(dec!(0.005), 2), dec!(0.01));
        assert_eq!(round_half_up(dec!(0.004), 2), dec!(0.00));
        assert_eq!(round_half_up(dec!(2.675), 2), dec!(2.68));
        assert_eq!(round_half_up(dec!(-0.005), 2), dec!(-0.01));
        assert_eq!(round_half_up(dec!(105), 2), dec!(105.00));
    }

    #[test]
    fn format_amount_cases() {
        assert_eq!(format_amount(dec!(100)), "100.00");
        assert_eq!(format_amount(dec!(0.1)), "0.10");
        assert_eq!(format_amount(dec!(49.90)), "49.90");
        assert_eq!(format_amount(dec!(0.005)), "0.005");
    }
}
