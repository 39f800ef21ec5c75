//! Utility functions and helpers

use rust_decimal::Decimal;

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;
    for c in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a decimal amount for the summary card: fixed decimal places and
/// a thousands-separated integer part, e.g. `1234567.5` -> `1,234,567.50`.
pub fn format_amount(amount: Decimal, decimal_places: u32) -> String {
    let rounded = amount.round_dp(decimal_places);
    let s = rounded.abs().to_string();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (s, String::new()),
    };

    let mut frac = frac_part;
    while (frac.len() as u32) < decimal_places {
        frac.push('0');
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    if decimal_places == 0 {
        format!("{}{}", sign, format_number(int_part))
    } else {
        format!("{}{}.{}", sign, format_number(int_part), frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5), "5");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from_str("1234567.5").unwrap(), 2), "1,234,567.50");
        assert_eq!(format_amount(Decimal::ZERO, 2), "0.00");
        assert_eq!(format_amount(Decimal::from_str("-999.999").unwrap(), 2), "-1,000.00");
        assert_eq!(format_amount(Decimal::from(42), 0), "42");
    }
}
