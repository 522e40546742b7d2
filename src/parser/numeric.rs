use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

// first run of digits and separators holding at least one digit; units and `%` after it are ignored
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9.,]*[0-9][0-9.,]*").unwrap());

/// first numeric literal in a raw value, with `,` read as the decimal separator.
///
/// The whole run must be one number: `.5` is 0.5, while `1..5` and `1.2.3`
/// are rejected rather than truncated.
pub fn extract_number(raw: &str) -> Option<Decimal> {
    let mut literal = NUMBER_PATTERN.find(raw)?.as_str().replace(',', ".");
    if literal.starts_with('.') {
        literal.insert(0, '0');
    }
    if literal.ends_with('.') {
        literal.push('0');
    }
    Decimal::from_str(&literal).ok()
}

/// whole, non-negative number that fits in a `u32`
pub fn whole_number(value: Decimal) -> Option<u32> {
    if !value.fract().is_zero() {
        return None;
    }
    value.to_u32()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_extract_plain_and_suffixed() {
        assert_eq!(extract_number("100000"), Some(dec!(100000)));
        assert_eq!(extract_number("5.5%"), Some(dec!(5.5)));
        assert_eq!(extract_number("0"), Some(dec!(0)));
        assert_eq!(extract_number("30 years"), Some(dec!(30)));
    }

    #[test]
    fn test_extract_comma_separator() {
        assert_eq!(extract_number("10,16"), Some(dec!(10.16)));
        assert_eq!(extract_number("3,1%"), Some(dec!(3.1)));
    }

    #[test]
    fn test_extract_bare_fraction() {
        assert_eq!(extract_number(".5%"), Some(dec!(0.5)));
        assert_eq!(extract_number(",75"), Some(dec!(0.75)));
        assert_eq!(extract_number("5.%"), Some(dec!(5)));
    }

    #[test]
    fn test_extract_skips_leading_noise() {
        assert_eq!(extract_number("$ 2500"), Some(dec!(2500)));
        assert_eq!(extract_number("about 7.25 percent"), Some(dec!(7.25)));
    }

    #[test]
    fn test_extract_rejects_non_numbers() {
        assert_eq!(extract_number(r#"eval("print("hello")")"#), None);
        assert_eq!(extract_number("%"), None);
        assert_eq!(extract_number("1.2.3"), None);
        assert_eq!(extract_number("1..5"), None);
        assert_eq!(extract_number("1,,5%"), None);
    }

    #[test]
    fn test_whole_number() {
        assert_eq!(whole_number(dec!(30)), Some(30));
        assert_eq!(whole_number(dec!(30.0)), Some(30));
        assert_eq!(whole_number(dec!(2.5)), None);
        assert_eq!(whole_number(dec!(99999999999)), None);
    }
}
