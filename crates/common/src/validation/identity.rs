//! Identity validators for ABDM identifiers

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ValidationError, ValidationResult};

/// Domain suffix every ABHA address carries.
pub const ABHA_ADDRESS_SUFFIX: &str = "@abdm";

/// Aadhaar pattern compiled once at first use
static AADHAAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("AADHAAR_REGEX pattern is valid"));

static MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("MOBILE_REGEX pattern is valid"));

/// Validate an Aadhaar number: exactly 12 ASCII digits.
///
/// # Errors
///
/// Returns a [`ValidationError`] on the `aadhaar_number` field.
pub fn validate_aadhaar_number(value: &str) -> ValidationResult<()> {
    if AADHAAR_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::field("aadhaar_number", "must be exactly 12 digits"))
    }
}

/// Validate a mobile number: exactly 10 ASCII digits, no country code.
///
/// # Errors
///
/// Returns a [`ValidationError`] on the `mobile_number` field.
pub fn validate_mobile_number(value: &str) -> ValidationResult<()> {
    if MOBILE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::field("mobile_number", "must be exactly 10 digits"))
    }
}

/// Validate an ABHA address: at least 3 characters and ending in `@abdm`.
///
/// The suffix is required at every length, so short bare handles such as
/// `"asha"` are rejected even though some other ABDM clients accept them.
///
/// # Errors
///
/// Returns a [`ValidationError`] on the `abha_address` field.
pub fn validate_abha_address(value: &str) -> ValidationResult<()> {
    if value.chars().count() < 3 {
        return Err(ValidationError::field("abha_address", "must be at least 3 characters"));
    }
    match value.strip_suffix(ABHA_ADDRESS_SUFFIX) {
        Some(handle) if !handle.is_empty() => Ok(()),
        _ => Err(ValidationError::field(
            "abha_address",
            format!("must be a handle followed by {ABHA_ADDRESS_SUFFIX}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates `validate_aadhaar_number` behavior for boundary lengths.
    ///
    /// Assertions:
    /// - Confirms 12 digits pass.
    /// - Ensures 11 digits, 13 digits and non-digits fail.
    #[test]
    fn test_aadhaar_number_lengths() {
        assert!(validate_aadhaar_number("123456789012").is_ok());
        assert!(validate_aadhaar_number("12345678901").is_err());
        assert!(validate_aadhaar_number("1234567890123").is_err());
        assert!(validate_aadhaar_number("12345678901a").is_err());
    }

    /// Validates `validate_mobile_number` behavior for the 9 vs 10 digit
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures 9 digits fail on the `mobile_number` field.
    /// - Confirms 10 digits pass.
    /// - Ensures non-ASCII digits are rejected.
    #[test]
    fn test_mobile_number_lengths() {
        let err = validate_mobile_number("987654321").unwrap_err();
        assert_eq!(err.errors[0].field, "mobile_number");

        assert!(validate_mobile_number("9876543210").is_ok());
        assert!(validate_mobile_number("+919876543210").is_err());
        assert!(validate_mobile_number("٩٨٧٦٥٤٣٢١٠").is_err());
    }

    /// Validates `validate_abha_address` behavior.
    ///
    /// Assertions:
    /// - Confirms a handle with the `@abdm` suffix passes.
    /// - Ensures a bare suffix, short strings and other domains fail.
    #[test]
    fn test_abha_address() {
        assert!(validate_abha_address("asha.rao@abdm").is_ok());
        assert!(validate_abha_address("@abdm").is_err());
        assert!(validate_abha_address("ab").is_err());
        assert!(validate_abha_address("asha.rao@sbx").is_err());
        assert!(validate_abha_address("asha").is_err(), "suffix is required for short handles");
    }
}
