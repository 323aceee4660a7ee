//! PIN validation.

use crate::error::{Result, VaultError};

/// Minimum PIN length in characters.
pub const MIN_PIN_LENGTH: usize = 4;

/// Validate a PIN before it is used for key derivation.
///
/// # Requirements
///
/// - Not empty or only whitespace
/// - At least 4 characters long
///
/// # Examples
///
/// ```
/// use passfort_core::crypto::validate_pin;
///
/// assert!(validate_pin("1234").is_ok());
/// assert!(validate_pin("123").is_err());
/// ```
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.trim().is_empty() {
        return Err(VaultError::InvalidPin("PIN cannot be empty".to_string()));
    }

    let length = pin.chars().count();
    if length < MIN_PIN_LENGTH {
        return Err(VaultError::InvalidPin(format!(
            "PIN must be at least {} characters (got {})",
            MIN_PIN_LENGTH, length
        )));
    }

    Ok(())
}
