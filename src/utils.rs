// src/utils.rs
use ethers::types::U256;

use crate::core::errors::SwapError;

/// Minimal hex quantity: `0x` + lowercase digits, no leading zeros (`0` -> `0x0`).
pub fn to_hex_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Parse a base-unit integer given either as decimal or as a 0x-prefixed hex quantity.
pub fn parse_quantity(value: &str) -> Result<U256, SwapError> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex_digits) if !hex_digits.is_empty() => U256::from_str_radix(hex_digits, 16).ok(),
        Some(_) => None,
        None if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) => {
            U256::from_dec_str(trimmed).ok()
        }
        None => None,
    };
    parsed.ok_or_else(|| SwapError::InvalidAmount(format!("'{}' is not an integer quantity", value)))
}

/// Validate a human-readable decimal amount such as `"1"` or `"0.25"`.
fn validate_decimal(amount: &str) -> Result<&str, SwapError> {
    let trimmed = amount.trim();
    let mut parts = trimmed.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    let digits_ok = whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
        && !(whole.is_empty() && fraction.is_empty());
    if !digits_ok {
        return Err(SwapError::InvalidAmount(format!("'{}' is not a decimal amount", amount)));
    }
    Ok(trimmed)
}

/// Largest scale whose `10^decimals` still fits in a U256.
const MAX_DECIMALS: u32 = 77;

/// Scale a decimal amount by `decimals` into base units. Zero is allowed.
///
/// Amounts that do not fit in a U256 once scaled are rejected, not wrapped.
pub fn decimal_to_base_units(amount: &str, decimals: u32) -> Result<U256, SwapError> {
    let amount = validate_decimal(amount)?;
    if decimals > MAX_DECIMALS {
        return Err(SwapError::InvalidAmount(format!(
            "{} decimals exceeds the supported maximum of {}",
            decimals, MAX_DECIMALS
        )));
    }
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if fraction.len() > decimals as usize {
        return Err(SwapError::InvalidAmount(format!(
            "'{}' has more than {} decimal places",
            amount, decimals
        )));
    }

    let digits = format!("{}{:0<width$}", whole, fraction, width = decimals as usize);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_dec_str(digits)
        .map_err(|_| SwapError::InvalidAmount(format!("'{}' overflows 256 bits in base units", amount)))
}

/// Like [`decimal_to_base_units`] but rejects zero.
pub fn positive_base_units(amount: &str, decimals: u32) -> Result<U256, SwapError> {
    let value = decimal_to_base_units(amount, decimals)?;
    if value.is_zero() {
        return Err(SwapError::InvalidAmount(format!("'{}' must be greater than zero", amount)));
    }
    Ok(value)
}

/// Convert a gwei-denominated decimal string into wei.
pub fn gwei_to_wei(gwei: &str) -> Result<U256, SwapError> {
    decimal_to_base_units(gwei, 9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_quantity() {
        assert_eq!(to_hex_quantity(U256::zero()), "0x0");
        assert_eq!(to_hex_quantity(U256::from(50_000u64)), "0xc350");
        assert_eq!(to_hex_quantity(U256::from(100_000_000_000u64)), "0x174876e800");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("50000").unwrap(), U256::from(50_000u64));
        assert_eq!(parse_quantity("0xc350").unwrap(), U256::from(50_000u64));
        assert_eq!(parse_quantity("0").unwrap(), U256::zero());
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("-1").is_err());
    }

    #[test]
    fn test_gwei_to_wei() {
        assert_eq!(to_hex_quantity(gwei_to_wei("154").unwrap()), "0x23db1d8400");
        assert_eq!(to_hex_quantity(gwei_to_wei("10").unwrap()), "0x2540be400");
        assert_eq!(gwei_to_wei("1.5").unwrap(), U256::from(1_500_000_000u64));
    }

    #[test]
    fn test_decimal_to_base_units() {
        let one_dai = decimal_to_base_units("1", 18).unwrap();
        assert_eq!(to_hex_quantity(one_dai), "0xde0b6b3a7640000");
        assert_eq!(decimal_to_base_units("0.5", 6).unwrap(), U256::from(500_000u64));
        assert!(decimal_to_base_units("0.0000001", 6).is_err());
        assert!(decimal_to_base_units("-1", 18).is_err());
        assert!(decimal_to_base_units("abc", 18).is_err());
        assert!(decimal_to_base_units(".", 18).is_err());
        assert_eq!(decimal_to_base_units("1.", 18).unwrap(), one_dai);
        assert_eq!(decimal_to_base_units("007", 0).unwrap(), U256::from(7u64));
    }

    #[test]
    fn test_decimal_to_base_units_overflow_is_an_error() {
        let huge = format!("1{}", "0".repeat(60));
        assert!(matches!(decimal_to_base_units(&huge, 18), Err(SwapError::InvalidAmount(_))));
        assert!(matches!(positive_base_units(&huge, 18), Err(SwapError::InvalidAmount(_))));
        let huge_gwei = format!("1{}.5", "0".repeat(70));
        assert!(matches!(gwei_to_wei(&huge_gwei), Err(SwapError::InvalidAmount(_))));
        assert!(matches!(decimal_to_base_units("1", 80), Err(SwapError::InvalidAmount(_))));
        assert!(matches!(decimal_to_base_units("1", u32::MAX), Err(SwapError::InvalidAmount(_))));

        // Exactly U256::MAX still fits.
        let max = U256::MAX.to_string();
        assert_eq!(decimal_to_base_units(&max, 0).unwrap(), U256::MAX);
        assert!(decimal_to_base_units(&format!("{}0", max), 0).is_err());
    }

    #[test]
    fn test_positive_base_units_rejects_zero() {
        assert!(positive_base_units("0", 18).is_err());
        assert!(positive_base_units("0.000", 18).is_err());
        assert!(positive_base_units("0.001", 18).is_ok());
    }
}
