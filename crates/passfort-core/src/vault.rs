//! Vault operations: save, get, remove, list and export.
//!
//! `VaultService` owns an [`EntryStore`] and never holds key material between
//! calls. PIN-scoped work goes through a [`Session`], which carries the
//! derived key for as long as the caller keeps it and zeroizes it on drop.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::{decrypt, derive_key, encrypt, DerivedKey, Field, SealedBlob};
use crate::error::{Result, VaultError};
use crate::export::write_csv;
use crate::storage::{EntryId, EntryStore, EntrySummary, NewVaultEntry, VaultEntry};

/// An entry with its sensitive fields decrypted.
#[derive(Clone)]
pub struct DecryptedEntry {
    pub id: EntryId,
    pub site: String,
    pub username: Option<String>,
    pub password: Zeroizing<String>,
    pub notes: Option<Zeroizing<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for DecryptedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptedEntry")
            .field("id", &self.id)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("notes", &self.notes.as_ref().map(|_| "[REDACTED]"))
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Treat empty or whitespace-only optional fields as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_new_entry(site: &str, password: &str) -> Result<()> {
    if site.trim().is_empty() {
        return Err(VaultError::Validation("Site cannot be empty".to_string()));
    }
    if password.is_empty() {
        return Err(VaultError::Validation(
            "Password cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Orchestrates key derivation, encryption and storage.
pub struct VaultService<S> {
    store: S,
}

impl<S: EntryStore> VaultService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Derive the vault key from `pin` and open a session around it.
    ///
    /// Any PIN of valid shape unlocks a session; a wrong one only shows up
    /// when a decryption fails.
    pub fn unlock(&self, pin: &str) -> Result<Session<'_, S>> {
        let metadata = self.store.metadata()?;
        let key = derive_key(pin, &metadata.kdf_salt, &metadata.kdf_params)?;
        Ok(Session {
            store: &self.store,
            key,
        })
    }

    /// Encrypt and store a new entry, returning its id.
    ///
    /// # Errors
    ///
    /// - `VaultError::Validation` if `site` or `password` is empty
    /// - `VaultError::InvalidPin` if the PIN is too short
    /// - `VaultError::Storage` if the insert fails
    pub fn save(
        &self,
        site: &str,
        username: Option<&str>,
        password: &str,
        pin: &str,
        notes: Option<&str>,
    ) -> Result<EntryId> {
        // Reject bad input before paying for key derivation
        validate_new_entry(site, password)?;
        self.unlock(pin)?.save(site, username, password, notes)
    }

    /// Fetch and decrypt one entry.
    ///
    /// # Errors
    ///
    /// - `VaultError::NotFound` if no entry has this id (checked before the PIN)
    /// - `VaultError::Decryption` if the PIN is wrong or the record is corrupt
    pub fn get(&self, id: EntryId, pin: &str) -> Result<DecryptedEntry> {
        let entry = self.store.get(id)?;
        self.unlock(pin)?.decrypt_entry(entry)
    }

    /// Permanently delete an entry.
    pub fn remove(&self, id: EntryId) -> Result<()> {
        self.store.delete(id)
    }

    /// Non-secret summaries of every entry, in storage order.
    pub fn list(&self) -> Result<Vec<EntrySummary>> {
        self.store.summaries()
    }

    /// Decrypt every entry with `pin` and render them as CSV.
    ///
    /// All-or-nothing: the first entry that fails to decrypt aborts the
    /// export with `VaultError::Decryption` naming that entry.
    pub fn export_all(&self, pin: &str) -> Result<Zeroizing<Vec<u8>>> {
        self.unlock(pin)?.export_all()
    }
}

/// A vault unlocked with one PIN.
///
/// The derived key lives only inside the session and is zeroized when the
/// session is dropped or [`Session::lock`]ed.
pub struct Session<'a, S> {
    store: &'a S,
    key: DerivedKey,
}

impl<'a, S: EntryStore> Session<'a, S> {
    /// Encrypt and store a new entry under this session's key.
    pub fn save(
        &self,
        site: &str,
        username: Option<&str>,
        password: &str,
        notes: Option<&str>,
    ) -> Result<EntryId> {
        validate_new_entry(site, password)?;

        let sealed_notes = non_blank(notes)
            .map(|n| encrypt(n.as_bytes(), &self.key, Field::Notes))
            .transpose()?;
        let entry = NewVaultEntry {
            site: site.trim().to_string(),
            username: non_blank(username).map(|u| u.trim().to_string()),
            password: encrypt(password.as_bytes(), &self.key, Field::Password)?,
            notes: sealed_notes,
        };

        self.store.insert(&entry)
    }

    /// Fetch and decrypt one entry.
    pub fn get(&self, id: EntryId) -> Result<DecryptedEntry> {
        let entry = self.store.get(id)?;
        self.decrypt_entry(entry)
    }

    /// Decrypt every stored entry, stopping at the first failure.
    pub fn decrypt_all(&self) -> Result<Vec<DecryptedEntry>> {
        self.store
            .list()?
            .into_iter()
            .map(|entry| self.decrypt_entry(entry))
            .collect()
    }

    /// Decrypt every stored entry and render them as CSV.
    pub fn export_all(&self) -> Result<Zeroizing<Vec<u8>>> {
        let entries = self.decrypt_all()?;
        let csv = write_csv(&entries)?;
        debug!(entries = entries.len(), "exported vault");
        Ok(csv)
    }

    /// End the session, zeroizing the key.
    pub fn lock(self) {}

    fn open_field(
        &self,
        id: EntryId,
        blob: &SealedBlob,
        field: Field,
    ) -> Result<Zeroizing<String>> {
        let plaintext = decrypt(blob, &self.key, field).map_err(|e| {
            warn!(%id, ?field, "decryption failed");
            e.for_entry(id)
        })?;
        let text = std::str::from_utf8(&plaintext)
            .map_err(|_| VaultError::Crypto(format!("Entry {} holds non UTF-8 data", id)))?;
        Ok(Zeroizing::new(text.to_owned()))
    }

    fn decrypt_entry(&self, entry: VaultEntry) -> Result<DecryptedEntry> {
        let password = self.open_field(entry.id, &entry.password, Field::Password)?;
        let notes = entry
            .notes
            .as_ref()
            .map(|blob| self.open_field(entry.id, blob, Field::Notes))
            .transpose()?;

        Ok(DecryptedEntry {
            id: entry.id,
            site: entry.site,
            username: entry.username,
            password,
            notes,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        })
    }
}
