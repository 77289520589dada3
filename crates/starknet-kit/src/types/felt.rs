//! Field element parsing and selector derivation.
//!
//! [`Felt`] is the field element from `starknet-types-core`. This module adds
//! the strict string form used for user input: `0x`-prefixed hex, at most 64
//! digits, strictly below the field prime.

use starknet_core::utils::get_selector_from_name;
pub use starknet_types_core::felt::Felt;

use crate::error::ParseFeltError;

/// Parse a `0x`-prefixed hex string into a field element.
///
/// Unlike [`Felt::from_hex`], values at or above the field prime are
/// rejected instead of being reduced, and the prefix is mandatory.
///
/// # Example
///
/// ```
/// use starknet_kit::{Felt, parse_felt};
///
/// assert_eq!(parse_felt("0x12")?, Felt::from(18u64));
/// assert!(parse_felt("18").is_err());
/// # Ok::<(), starknet_kit::ParseFeltError>(())
/// ```
pub fn parse_felt(s: &str) -> Result<Felt, ParseFeltError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| ParseFeltError::MissingPrefix(s.to_string()))?;

    if digits.is_empty() {
        return Err(ParseFeltError::Empty);
    }
    if digits.len() > 64 {
        return Err(ParseFeltError::TooLong(s.to_string()));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseFeltError::InvalidHex(s.to_string()));
    }

    let digits = digits.to_ascii_lowercase();
    let significant = digits.trim_start_matches('0');
    if exceeds_max(significant) {
        return Err(ParseFeltError::OutOfRange(s.to_string()));
    }

    Felt::from_hex(&format!("0x{}", digits))
        .map_err(|_| ParseFeltError::InvalidHex(s.to_string()))
}

/// Derive the entry-point selector for a function name.
///
/// This is the Starknet keccak of the name. `__default__` and
/// `__l1_default__` map to zero. Only ASCII names have a selector.
pub fn selector_from_name(name: &str) -> Result<Felt, ParseFeltError> {
    get_selector_from_name(name).map_err(|_| ParseFeltError::NonAsciiName(name.to_string()))
}

/// Compares lowercase hex digits without leading zeros against `Felt::MAX`.
fn exceeds_max(significant: &str) -> bool {
    let max = Felt::MAX.to_hex_string();
    let max = max.trim_start_matches("0x");
    significant.len() > max.len() || (significant.len() == max.len() && significant > max)
}
