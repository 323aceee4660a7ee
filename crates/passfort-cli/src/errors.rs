//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes. Core `VaultError`s that reach
//! `main` are classified the same way so a wrong PIN, a missing entry and a
//! bad argument each exit with their own code.

use std::fmt;

use passfort_core::VaultError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Resource not found (config, vault, entry)
    NotFound { message: String, hint: String },

    /// Decryption failed (wrong PIN, tampered record, wrong export passphrase)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Vault integrity check failed
    IntegrityFailed(String),

    /// Anything else
    Other(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hint() {
            Some(hint) => write!(f, "{}\n{}", self.message(), hint),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Map a core error onto a CLI error, if it has a dedicated exit code.
    pub fn from_vault(err: &VaultError) -> Option<Self> {
        let mapped = match err {
            VaultError::NotFound(id) => CliError::not_found(
                format!("Entry not found: {}", id),
                "Hint: Run `passfort list` to see entry IDs.",
            ),
            VaultError::VaultNotFound(path) => CliError::not_found(
                format!("No vault found at {}", path.display()),
                "Hint: Run `passfort init` to create one, or pass --vault.",
            ),
            VaultError::Decryption { .. } => CliError::auth_failed_with_hint(
                err.to_string(),
                "Hint: Check the PIN. If it is correct, run `passfort check` to look for corrupt records.",
            ),
            other if other.is_validation() => CliError::InvalidInput(other.to_string()),
            _ => return None,
        };
        Some(mapped)
    }

    /// Classify any error reaching `main`.
    pub fn classify(err: &anyhow::Error) -> Self {
        if let Some(cli_error) = err.downcast_ref::<CliError>() {
            return cli_error.clone();
        }
        if let Some(mapped) = err
            .downcast_ref::<VaultError>()
            .and_then(CliError::from_vault)
        {
            return mapped;
        }
        CliError::Other(format!("{:#}", err))
    }

    /// The primary message, without hint.
    pub fn message(&self) -> &str {
        match self {
            CliError::NotFound { message, .. } | CliError::AuthFailed { message, .. } => message,
            CliError::InvalidInput(message)
            | CliError::IntegrityFailed(message)
            | CliError::Other(message) => message,
        }
    }

    /// The hint line, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => Some(hint.as_str()),
            CliError::AuthFailed { hint, .. } => hint.as_deref(),
            CliError::IntegrityFailed(_) => {
                Some("Hint: Delete the damaged entry with `passfort delete <id> --yes`, or restore from a backup.")
            }
            CliError::InvalidInput(_) | CliError::Other(_) => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
            CliError::Other(_) => exit_codes::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passfort_core::EntryId;

    #[test]
    fn test_vault_errors_map_to_exit_codes() {
        let not_found = VaultError::NotFound(EntryId::new(7));
        assert_eq!(
            CliError::from_vault(&not_found).map(|e| e.exit_code()),
            Some(exit_codes::NOT_FOUND)
        );

        let decryption = VaultError::Decryption {
            entry: Some(EntryId::new(7)),
        };
        assert_eq!(
            CliError::from_vault(&decryption).map(|e| e.exit_code()),
            Some(exit_codes::AUTH_FAILED)
        );

        let pin = VaultError::InvalidPin("too short".to_string());
        assert_eq!(
            CliError::from_vault(&pin).map(|e| e.exit_code()),
            Some(exit_codes::INVALID_INPUT)
        );

        assert!(CliError::from_vault(&VaultError::Storage("disk".to_string())).is_none());
    }

    #[test]
    fn test_classify_sees_through_context() {
        let err = anyhow::Error::new(VaultError::NotFound(EntryId::new(3)))
            .context("Failed to show entry");
        assert_eq!(CliError::classify(&err).exit_code(), exit_codes::NOT_FOUND);

        let err = anyhow::Error::new(CliError::invalid_input("bad"));
        assert_eq!(
            CliError::classify(&err).exit_code(),
            exit_codes::INVALID_INPUT
        );

        let err = anyhow::anyhow!("something else");
        assert_eq!(CliError::classify(&err).exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::not_found("Entry not found: 3", "Hint: list");
        assert_eq!(err.to_string(), "Entry not found: 3\nHint: list");
        assert_eq!(CliError::invalid_input("bad").to_string(), "bad");
    }
}
