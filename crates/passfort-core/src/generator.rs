//! Random password generation.
//!
//! Lowercase letters are always included; uppercase, digits and symbols are
//! opt-in. Every character is drawn independently and uniformly from the
//! concatenation of the enabled classes, using the OS CSPRNG.

use std::ops::RangeInclusive;

use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/";

/// Accepted password lengths.
pub const LENGTH_RANGE: RangeInclusive<usize> = 5..=30;

/// Composition rules for a generated password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub length: usize,
    pub uppercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl GeneratorOptions {
    pub fn new(length: usize, uppercase: bool, numbers: bool, symbols: bool) -> Self {
        Self {
            length,
            uppercase,
            numbers,
            symbols,
        }
    }

    /// The concatenated alphabet of all enabled classes.
    pub fn alphabet(&self) -> Vec<char> {
        let mut chars: Vec<char> = LOWERCASE.chars().collect();
        if self.uppercase {
            chars.extend(UPPERCASE.chars());
        }
        if self.numbers {
            chars.extend(DIGITS.chars());
        }
        if self.symbols {
            chars.extend(SYMBOLS.chars());
        }
        chars
    }

    pub fn validate(&self) -> Result<()> {
        if !LENGTH_RANGE.contains(&self.length) {
            return Err(VaultError::Validation(format!(
                "Password length must be between {} and {} (got {})",
                LENGTH_RANGE.start(),
                LENGTH_RANGE.end(),
                self.length
            )));
        }
        Ok(())
    }
}

/// Generate a password under `options`.
///
/// # Errors
///
/// Returns `VaultError::Validation` if the length is outside 5..=30.
pub fn generate_password(options: &GeneratorOptions) -> Result<String> {
    options.validate()?;

    let alphabet = options.alphabet();
    let mut rng = OsRng;
    let password = (0..options.length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect();
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_any(password: &str, class: &str) -> bool {
        password.chars().any(|c| class.contains(c))
    }

    #[test]
    fn test_length_is_exact() {
        for length in LENGTH_RANGE {
            let options = GeneratorOptions::new(length, true, true, true);
            assert_eq!(generate_password(&options).unwrap().chars().count(), length);
        }
    }

    #[test]
    fn test_length_out_of_range_rejected() {
        for length in [0, 4, 31, 100] {
            let options = GeneratorOptions::new(length, true, true, true);
            assert!(matches!(
                generate_password(&options),
                Err(VaultError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_lowercase_only_by_default_class() {
        let options = GeneratorOptions::new(30, false, false, false);
        for _ in 0..50 {
            let password = generate_password(&options).unwrap();
            assert!(password.chars().all(|c| LOWERCASE.contains(c)));
        }
    }

    #[test]
    fn test_disabled_classes_never_appear() {
        let options = GeneratorOptions::new(30, true, false, false);
        for _ in 0..50 {
            let password = generate_password(&options).unwrap();
            assert!(!contains_any(&password, DIGITS));
            assert!(!contains_any(&password, SYMBOLS));
        }
    }

    #[test]
    fn test_all_classes_observed_over_many_trials() {
        let options = GeneratorOptions::new(12, true, true, true);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let password = generate_password(&options).unwrap();
            assert_eq!(password.len(), 12);
            for (i, class) in [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS].iter().enumerate() {
                seen[i] |= contains_any(&password, class);
            }
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_alphabet_size() {
        assert_eq!(GeneratorOptions::new(8, false, false, false).alphabet().len(), 26);
        assert_eq!(GeneratorOptions::new(8, true, true, true).alphabet().len(), 26 + 26 + 10 + 27);
    }
}
