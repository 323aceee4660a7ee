//! Entry store trait definition.
//!
//! The `EntryStore` trait is the persistence seam under `VaultService`.
//! Stores only ever see sealed blobs; they never hold keys or plaintext.

use super::types::{EntryId, EntrySummary, NewVaultEntry, VaultEntry, VaultMetadata};
use crate::error::Result;

/// Persistent keyed collection of vault entries.
///
/// All implementations must ensure:
/// - Ids are unique and never reused, even after deletion
/// - `insert` is durable before it returns, and either fully succeeds or
///   leaves no trace
/// - Concurrent callers never observe a torn insert or delete
pub trait EntryStore: Send + Sync {
    /// Vault metadata (salt, KDF params, identifiers).
    fn metadata(&self) -> Result<VaultMetadata>;

    /// Insert a new entry and return its freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Storage` if the write fails; nothing is persisted.
    fn insert(&self, entry: &NewVaultEntry) -> Result<EntryId>;

    /// All entries in storage order (ascending id).
    fn list(&self) -> Result<Vec<VaultEntry>>;

    /// Non-secret summaries of all entries in storage order.
    ///
    /// Sealed fields are not read, so one damaged blob never hides the
    /// other entries.
    fn summaries(&self) -> Result<Vec<EntrySummary>>;

    /// Non-secret summary of one entry.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if no entry has this id.
    fn summary(&self, id: EntryId) -> Result<EntrySummary>;

    /// Get an entry by id.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if no entry has this id.
    fn get(&self, id: EntryId) -> Result<VaultEntry>;

    /// Permanently delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if no entry has this id.
    fn delete(&self, id: EntryId) -> Result<()>;

    /// Number of stored entries.
    fn count(&self) -> Result<usize>;

    /// Check store integrity.
    ///
    /// Verifies:
    /// - Backend consistency checks pass
    /// - Every stored blob is long enough to hold a nonce and tag
    fn check_integrity(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn_store(_store: &dyn EntryStore) {}
    }
}
