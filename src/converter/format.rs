//! Locale-independent display formatting and lenient parsing of amounts.
use crate::converter::Amount;

/// Separator inserted between groups of three integer digits.
pub const GROUPING_SEPARATOR: char = ',';

/// Separator between the integer and fractional digits.
pub const DECIMAL_SEPARATOR: char = '.';

/// Maximum number of fractional digits shown.
pub const FRACTION_DIGITS: usize = 2;

/// Formats an amount with grouped thousands and at most two fractional digits,
/// dropping trailing fractional zeros.
///
/// `1234.5` is rendered as `"1,234.5"`, `0.3333` as `"0.33"` and `1.0` as `"1"`.
/// An amount that rounds to zero never carries a sign.
pub fn format_amount(amount: Amount) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", FRACTION_DIGITS, amount.abs());
    let (integer, fraction) = fixed
        .split_once(DECIMAL_SEPARATOR)
        .unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut formatted = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    if amount.is_sign_negative() && !(integer == "0" && fraction.is_empty()) {
        formatted.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            formatted.push(GROUPING_SEPARATOR);
        }
        formatted.push(digit);
    }
    if !fraction.is_empty() {
        formatted.push(DECIMAL_SEPARATOR);
        formatted.push_str(fraction);
    }
    formatted
}

/// Parses user text into an amount, ignoring grouping separators and whitespace.
/// Blank, malformed or non-finite input yields zero.
pub fn parse_amount(text: &str) -> Amount {
    let normalized: String = text
        .chars()
        .filter(|c| *c != GROUPING_SEPARATOR && !c.is_whitespace())
        .collect();
    match normalized.parse::<Amount>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => 0.0,
    }
}
