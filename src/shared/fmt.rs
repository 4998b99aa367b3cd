//! Parsing and display helpers for form input.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse user-entered decimal text.
///
/// Surrounding whitespace is ignored; empty or non-numeric input yields `None`.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Shorten an address to `head…tail` form for display.
///
/// Addresses too short to shorten are returned unchanged. Counts are in
/// characters, not bytes.
pub fn short_address(address: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= head + tail {
        return address.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.5"), Some(Decimal::new(15, 1)));
        assert_eq!(parse_amount(" 0.01 "), Some(Decimal::new(1, 2)));
        assert_eq!(parse_amount("-2"), Some(Decimal::new(-2, 0)));
        assert_eq!(parse_amount("1e3"), Some(Decimal::new(1000, 0)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx", 12, 6),
            "tb1qw508d6qe...xpjzsx"
        );
        assert_eq!(
            short_address("0x52908400098527886E0F7030069857D2E4169EE7", 8, 6),
            "0x529084...169EE7"
        );
        assert_eq!(short_address("tb1qxyz", 12, 6), "tb1qxyz");
    }
}
