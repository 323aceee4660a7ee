//! Error types for PassFort core operations.
//!
//! This module defines the error hierarchy for all vault operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::EntryId;

/// Result type alias for PassFort operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for PassFort operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// PIN is empty or shorter than the minimum length
    #[error("Invalid PIN: {0}")]
    InvalidPin(String),

    /// Bad input shape (empty site, empty password, length out of range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No entry exists for the given id
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    /// Vault file does not exist
    #[error("Vault not found: {}", .0.display())]
    VaultNotFound(PathBuf),

    /// Authentication failure: wrong PIN, or corrupted/tampered ciphertext.
    ///
    /// The two causes are indistinguishable by construction.
    #[error(
        "Decryption failed{}: incorrect PIN or corrupted data",
        .entry.map(|id| format!(" for entry {}", id)).unwrap_or_default()
    )]
    Decryption { entry: Option<EntryId> },

    /// Cipher or key derivation setup failure (not an authentication failure)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Persistence layer failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VaultError {
    /// Shorthand for a decryption failure not tied to a stored entry.
    pub fn decryption() -> Self {
        VaultError::Decryption { entry: None }
    }

    /// True for input-shape errors, including PIN validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, VaultError::InvalidPin(_) | VaultError::Validation(_))
    }

    /// Attach an entry id to a decryption failure; other errors pass through.
    pub(crate) fn for_entry(self, id: EntryId) -> Self {
        match self {
            VaultError::Decryption { .. } => VaultError::Decryption { entry: Some(id) },
            other => other,
        }
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for VaultError {
    fn from(err: rusqlite::Error) -> Self {
        VaultError::Storage(format!("SQLite error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decryption_message_names_entry() {
        let err = VaultError::Decryption {
            entry: Some(EntryId::new(7)),
        };
        assert_eq!(
            err.to_string(),
            "Decryption failed for entry 7: incorrect PIN or corrupted data"
        );
        assert_eq!(
            VaultError::decryption().to_string(),
            "Decryption failed: incorrect PIN or corrupted data"
        );
    }

    #[test]
    fn test_for_entry_only_touches_decryption() {
        let id = EntryId::new(3);
        assert!(matches!(
            VaultError::decryption().for_entry(id),
            VaultError::Decryption { entry: Some(e) } if e == id
        ));
        assert!(matches!(
            VaultError::Storage("x".into()).for_entry(id),
            VaultError::Storage(_)
        ));
    }

    #[test]
    fn test_validation_grouping() {
        assert!(VaultError::InvalidPin("short".into()).is_validation());
        assert!(VaultError::Validation("empty".into()).is_validation());
        assert!(!VaultError::decryption().is_validation());
    }
}
