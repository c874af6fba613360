// src/format.rs
//
// pt-BR money and percentage formatting: comma decimal separator, dot
// thousands separator, values clamped to the ranges the financial inputs
// accept (currency up to 999.999.999,99, percentages up to 99,99).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

fn max_currency() -> Decimal {
    dec!(999999999.99)
}

fn max_percent() -> Decimal {
    dec!(99.99)
}

/// Render a currency amount as "1.234,56". Zero renders as "0,00";
/// anything outside [0, 999999999.99] is clamped first.
pub fn format_currency(value: Decimal) -> String {
    if value.is_zero() {
        return "0,00".to_string();
    }
    let clamped = value.clamp(Decimal::ZERO, max_currency());
    group_thousands(clamped)
}

/// Render a percentage as "12,50" with no grouping, clamped to [0, 99.99].
pub fn format_percent(value: Decimal) -> String {
    if value.is_zero() {
        return "0,00".to_string();
    }
    let clamped = value.clamp(Decimal::ZERO, max_percent());
    let rounded = clamped.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded).replace('.', ",")
}

/// Parse a pt-BR currency string ("1.234,56"). Empty or unparsable input
/// yields zero; the result is clamped to [0, 999999999.99].
pub fn parse_currency(input: &str) -> Decimal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    // Dots are thousands separators, the comma is the decimal separator
    let normalized = trimmed.replace('.', "").replace(',', ".");
    normalized
        .parse::<Decimal>()
        .map(|v| v.clamp(Decimal::ZERO, max_currency()))
        .unwrap_or(Decimal::ZERO)
}

/// Parse a pt-BR percentage string ("7,5"). Empty or unparsable input
/// yields zero; the result is clamped to [0, 99.99].
pub fn parse_percent(input: &str) -> Decimal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    let normalized = trimmed.replace(',', ".");
    normalized
        .parse::<Decimal>()
        .map(|v| v.clamp(Decimal::ZERO, max_percent()))
        .unwrap_or(Decimal::ZERO)
}

fn group_thousands(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded);
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*ch);
    }

    format!("{},{}", grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_currency_with_grouping() {
        assert_eq!(format_currency(dec!(1234.5)), "1.234,50");
        assert_eq!(format_currency(dec!(999999999.99)), "999.999.999,99");
        assert_eq!(format_currency(dec!(42)), "42,00");
        assert_eq!(format_currency(dec!(1013.32)), "1.013,32");
    }

    #[test]
    fn currency_zero_and_clamping() {
        assert_eq!(format_currency(Decimal::ZERO), "0,00");
        assert_eq!(format_currency(dec!(-5)), "0,00");
        // Values past the cap collapse onto it
        assert_eq!(format_currency(dec!(1000000000)), "999.999.999,99");
    }

    #[test]
    fn formats_percent_without_grouping() {
        assert_eq!(format_percent(dec!(7.5)), "7,50");
        assert_eq!(format_percent(dec!(99.99)), "99,99");
        assert_eq!(format_percent(dec!(150)), "99,99");
        assert_eq!(format_percent(Decimal::ZERO), "0,00");
    }

    #[test]
    fn parses_currency_strings() {
        assert_eq!(parse_currency("1.234,56"), dec!(1234.56));
        assert_eq!(parse_currency("0,50"), dec!(0.50));
        assert_eq!(parse_currency(""), Decimal::ZERO);
        assert_eq!(parse_currency("abc"), Decimal::ZERO);
        assert_eq!(parse_currency("9999999999,00"), dec!(999999999.99));
    }

    #[test]
    fn parses_percent_strings() {
        assert_eq!(parse_percent("7,5"), dec!(7.5));
        assert_eq!(parse_percent("100"), dec!(99.99));
        assert_eq!(parse_percent(""), Decimal::ZERO);
        assert_eq!(parse_percent("x"), Decimal::ZERO);
    }
}
