//! # PassFort Core
//!
//! Core library for PassFort - a local password generator and encrypted
//! password vault.
//!
//! This crate provides key derivation, field encryption, the entry store
//! and vault operations, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: PIN validation, Argon2id key derivation, AES-256-GCM fields
//! - **storage**: `EntryStore` trait and the SQLite backend
//! - **vault**: `VaultService` and PIN-scoped sessions
//! - **export**: CSV export and Age-sealed export files
//! - **generator**: random password generation
//! - **strength**: heuristic strength scoring
//!
//! ## Example
//!
//! ```
//! use passfort_core::crypto::KdfParams;
//! use passfort_core::storage::SqliteStore;
//! use passfort_core::VaultService;
//!
//! let store = SqliteStore::open_in_memory(&KdfParams::new(1024, 1, 1)).unwrap();
//! let vault = VaultService::new(store);
//!
//! let id = vault
//!     .save("example.com", Some("alice"), "P@ssw0rd!", "1234", None)
//!     .unwrap();
//! assert_eq!(vault.get(id, "1234").unwrap().password.as_str(), "P@ssw0rd!");
//! assert!(vault.get(id, "9999").is_err());
//! ```

pub mod crypto;
pub mod error;
pub mod export;
pub mod fs;
pub mod generator;
pub mod storage;
pub mod strength;
pub mod vault;

pub use error::{Result, VaultError};
pub use storage::{EntryId, EntryStore, SqliteStore};
pub use vault::{DecryptedEntry, Session, VaultService};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
