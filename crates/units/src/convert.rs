//! Exact conversion between base-unit integers and decimal strings.
//!
//! Both directions work on digit strings only. Formatting is a split at
//! position `d` from the right; parsing pads the fraction to `d` digits and
//! reads the concatenation back as one integer. No floating point is involved.

use crate::amount::BaseAmount;
use crate::error::UnitsError;
use crate::unit::{Unit, UnitSpec};

/// Renders `amount / 10^d` with exactly `d` fractional digits.
///
/// ```
/// use ethlab_units::{format_units, BaseAmount};
///
/// let one_gwei = BaseAmount::from(1_000_000_000u64);
/// assert_eq!(format_units(&one_gwei, 9).unwrap(), "1.000000000");
/// assert_eq!(format_units(&one_gwei, "ether").unwrap(), "0.000000001000000000");
/// assert_eq!(format_units(&one_gwei, 0).unwrap(), "1000000000");
/// ```
pub fn format_units(amount: &BaseAmount, unit: impl Into<UnitSpec>) -> Result<String, UnitsError> {
    Ok(unit.into().resolve()?.format(amount))
}

/// Parses a decimal string into base units, refusing to drop precision.
///
/// ```
/// use ethlab_units::{parse_units, BaseAmount, UnitsError};
///
/// assert_eq!(parse_units("1.0", 9).unwrap(), BaseAmount::from(1_000_000_000u64));
/// assert!(matches!(
///     parse_units("1.0000000001", "gwei"),
///     Err(UnitsError::TooManyDecimals { found: 10, max: 9 })
/// ));
/// ```
pub fn parse_units(text: &str, unit: impl Into<UnitSpec>) -> Result<BaseAmount, UnitsError> {
    unit.into().resolve()?.parse(text)
}

pub fn format_ether(amount: &BaseAmount) -> String {
    Unit::ETHER.format(amount)
}

pub fn parse_ether(text: &str) -> Result<BaseAmount, UnitsError> {
    Unit::ETHER.parse(text)
}

pub fn format_gwei(amount: &BaseAmount) -> String {
    Unit::GWEI.format(amount)
}

pub fn parse_gwei(text: &str) -> Result<BaseAmount, UnitsError> {
    Unit::GWEI.parse(text)
}

/// Display form for people: trailing fractional zeros are dropped but one
/// digit is always kept after the point, so `1000000000` gwei shows as `"1.0"`.
/// Not suitable as input to anything that expects fixed-width output.
pub fn format_units_trimmed(amount: &BaseAmount, unit: impl Into<UnitSpec>) -> Result<String, UnitsError> {
    let unit = unit.into().resolve()?;
    let full = unit.format(amount);
    if unit.decimals() == 0 {
        return Ok(full);
    }

    let mut trimmed = full.trim_end_matches('0').to_string();
    if trimmed.ends_with('.') {
        trimmed.push('0');
    }
    Ok(trimmed)
}

pub(crate) fn format_scaled(amount: &BaseAmount, decimals: u8) -> String {
    let digits = amount.to_string();
    let width = usize::from(decimals);
    if width == 0 {
        return digits;
    }

    if digits.len() <= width {
        return format!("0.{digits:0>width$}");
    }

    let (whole, fraction) = digits.split_at(digits.len() - width);
    format!("{whole}.{fraction}")
}

pub(crate) fn parse_scaled(text: &str, decimals: u8) -> Result<BaseAmount, UnitsError> {
    let invalid = || UnitsError::InvalidNumberFormat(text.to_string());

    let unsigned = text.strip_prefix('+').unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    // a second '.' lands in `fraction` and fails here
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let width = usize::from(decimals);
    if fraction.len() > width {
        return Err(UnitsError::TooManyDecimals {
            found: fraction.len(),
            max: decimals,
        });
    }

    let mut digits = String::with_capacity(whole.len() + width);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(width - fraction.len()));

    BaseAmount::from_decimal_str(&digits).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> BaseAmount {
        s.parse().unwrap()
    }

    #[test]
    fn format_keeps_every_fractional_digit() {
        assert_eq!(format_units(&amount("1000000000"), 9).unwrap(), "1.000000000");
        assert_eq!(format_units(&amount("1000000000"), 0).unwrap(), "1000000000");
        assert_eq!(format_units(&BaseAmount::zero(), 18).unwrap(), "0.000000000000000000");
        assert_eq!(format_units(&amount("1"), 18).unwrap(), "0.000000000000000001");
        assert_eq!(format_units(&amount("123456"), 3).unwrap(), "123.456");
        assert_eq!(format_units(&amount("123456"), 6).unwrap(), "0.123456");
    }

    #[test]
    fn format_with_alias() {
        assert_eq!(format_units(&amount("1000000000"), "gwei").unwrap(), "1.000000000");
        assert_eq!(format_ether(&amount("1000000000")), "0.000000001000000000");
        assert_eq!(format_gwei(&amount("1500000000")), "1.500000000");
    }

    #[test]
    fn format_rejects_bad_unit() {
        assert!(matches!(format_units(&amount("1"), "eth"), Err(UnitsError::InvalidUnit(_))));
        assert!(matches!(format_units(&amount("1"), -1), Err(UnitsError::InvalidUnit(_))));
        // digit counts are integers, not strings
        assert!(matches!(format_units(&amount("1"), "18"), Err(UnitsError::InvalidUnit(_))));
    }

    #[test]
    fn parse_known_values() {
        assert_eq!(parse_units("1.0", 18).unwrap(), amount("1000000000000000000"));
        assert_eq!(parse_units("1.0", 9).unwrap(), amount("1000000000"));
        assert_eq!(parse_units("1.0", "gwei").unwrap(), amount("1000000000"));
        assert_eq!(parse_ether("1.0").unwrap(), amount("1000000000000000000"));
        assert_eq!(parse_ether("0.001").unwrap(), amount("1000000000000000"));
        assert_eq!(parse_gwei("2.5").unwrap(), amount("2500000000"));
    }

    #[test]
    fn parse_accepts_partial_forms() {
        assert_eq!(parse_units(".5", 1).unwrap(), amount("5"));
        assert_eq!(parse_units("5.", 1).unwrap(), amount("50"));
        assert_eq!(parse_units("+7", 2).unwrap(), amount("700"));
        assert_eq!(parse_units("007.10", 2).unwrap(), amount("710"));
        assert_eq!(parse_units("42", 0).unwrap(), amount("42"));
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in ["", ".", "+", "+.", "1.0.0", "-1", "1,000", " 1", "1e18", "++1", "0x10", "1 .0"] {
            assert!(
                matches!(parse_units(bad, 9), Err(UnitsError::InvalidNumberFormat(_))),
                "{bad:?} should be InvalidNumberFormat"
            );
        }
    }

    #[test]
    fn parse_never_truncates() {
        assert_eq!(
            parse_units("1.0000000001", 9),
            Err(UnitsError::TooManyDecimals { found: 10, max: 9 })
        );
        assert_eq!(
            parse_units("1.0", 0),
            Err(UnitsError::TooManyDecimals { found: 1, max: 0 })
        );
    }

    #[test]
    fn malformed_text_wins_over_precision() {
        assert!(matches!(parse_units("1.00x", 1), Err(UnitsError::InvalidNumberFormat(_))));
    }

    #[test]
    fn trimmed_display_matches_library_style() {
        let one_gwei = amount("1000000000");
        assert_eq!(format_units_trimmed(&one_gwei, "gwei").unwrap(), "1.0");
        assert_eq!(format_units_trimmed(&one_gwei, 9).unwrap(), "1.0");
        assert_eq!(format_units_trimmed(&one_gwei, "ether").unwrap(), "0.000000001");
        assert_eq!(format_units_trimmed(&one_gwei, 0).unwrap(), "1000000000");
        assert_eq!(format_units_trimmed(&BaseAmount::zero(), 6).unwrap(), "0.0");
    }
}
