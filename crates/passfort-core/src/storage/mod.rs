//! Storage abstraction for PassFort.
//!
//! This module defines the `EntryStore` trait and the types that cross it.
//! Stores persist sealed blobs plus plaintext metadata; key derivation and
//! encryption happen above them in `VaultService`.
//!
//! - `SqliteStore`: on-disk SQLite database (or in-memory for tests)

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::SqliteStore;
pub use traits::EntryStore;
pub use types::{EntryId, EntrySummary, NewVaultEntry, VaultEntry, VaultMetadata};
