//! SQLite storage backend.
//!
//! Entries live in an on-disk SQLite database. Sensitive fields are stored
//! as sealed blobs; the database itself is not encrypted, so everything
//! outside those blobs (site, username, timestamps) is visible to anyone
//! holding the file.
//!
//! A single connection sits behind a mutex and every write runs in its own
//! transaction, which serializes id assignment and deletes.

mod row;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::crypto::{generate_salt, KdfParams, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::error::{Result, VaultError};
use crate::storage::traits::EntryStore;
use crate::storage::types::{EntryId, EntrySummary, NewVaultEntry, VaultEntry, VaultMetadata};

use row::{EntryRow, SummaryRow};

/// On-disk format version written to `meta.format_version`.
pub const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- AUTOINCREMENT keeps ids of deleted rows from ever being handed out again
    CREATE TABLE entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        site TEXT NOT NULL,
        username TEXT,
        password BLOB NOT NULL,
        notes BLOB,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX entries_site ON entries (site);
    CREATE INDEX entries_created_at ON entries (created_at);
"#;

/// SQLite-backed entry store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new vault at `path` with a fresh salt.
    ///
    /// The schema is built in an owner-only temp file and moved into place
    /// without replacing anything, so a failed create never leaves a
    /// half-initialized vault behind and never clobbers an existing one.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Storage` if the file already exists or cannot be
    /// written, and `VaultError::Crypto` if `params` are invalid.
    pub fn create(path: &Path, params: &KdfParams) -> Result<Self> {
        if path.exists() {
            return Err(VaultError::Storage(format!(
                "Vault file already exists: {}",
                path.display()
            )));
        }
        params.validate()?;

        let temp_path = crate::fs::temp_sibling(path)?;
        // SQLite keeps the mode of an existing empty file
        drop(crate::fs::create_private(&temp_path)?);
        let initialized = Connection::open(&temp_path)
            .map_err(VaultError::from)
            .and_then(|mut conn| Self::initialize(&mut conn, params));
        if let Err(err) = initialized {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }

        crate::fs::persist_new(&temp_path, path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => {
                VaultError::Storage(format!("Vault file already exists: {}", path.display()))
            }
            _ => VaultError::Storage(format!("Failed to move vault into place: {}", e)),
        })?;
        debug!(path = %path.display(), "created vault");

        Self::open(path)
    }

    /// Open an existing vault.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::VaultNotFound` if the file is missing and
    /// `VaultError::Storage` if it is not a vault of a supported format.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VaultError::VaultNotFound(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        conn.pragma_update(None, "synchronous", "FULL")?;

        let format_version = Self::read_meta(&conn, "format_version")?;
        if format_version != FORMAT_VERSION {
            return Err(VaultError::Storage(format!(
                "Unsupported vault format version {} (expected {})",
                format_version, FORMAT_VERSION
            )));
        }

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Create a throwaway vault held entirely in memory.
    pub fn open_in_memory(params: &KdfParams) -> Result<Self> {
        params.validate()?;
        let mut conn = Connection::open_in_memory()?;
        Self::initialize(&mut conn, params)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Filesystem location, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn initialize(conn: &mut Connection, params: &KdfParams) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;

        let now = Utc::now().to_rfc3339();
        let meta = [
            ("format_version", FORMAT_VERSION.to_string()),
            ("vault_id", Uuid::new_v4().to_string()),
            ("created_at", now.clone()),
            ("last_modified", now),
            ("kdf_salt", hex::encode(generate_salt())),
            ("kdf_memory_kib", params.memory_kib.to_string()),
            ("kdf_iterations", params.iterations.to_string()),
            ("kdf_parallelism", params.parallelism.to_string()),
        ];
        for (key, value) in meta.iter() {
            tx.execute(
                "INSERT INTO meta (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| VaultError::Storage("SQLite connection poisoned".to_string()))
    }

    fn read_meta(conn: &Connection, key: &str) -> Result<String> {
        conn.query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?
        .ok_or_else(|| VaultError::Storage(format!("Missing metadata key: {}", key)))
    }

    fn read_meta_u32(conn: &Connection, key: &str) -> Result<u32> {
        Self::read_meta(conn, key)?
            .parse()
            .map_err(|e| VaultError::Storage(format!("Invalid {} in metadata: {}", key, e)))
    }

    fn touch(tx: &Transaction<'_>) -> Result<()> {
        tx.execute(
            "UPDATE meta SET value = ?1 WHERE key = 'last_modified'",
            [Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl EntryStore for SqliteStore {
    fn metadata(&self) -> Result<VaultMetadata> {
        let conn = self.lock_conn()?;

        let vault_id = Uuid::parse_str(&Self::read_meta(&conn, "vault_id")?)
            .map_err(|e| VaultError::Storage(format!("Invalid vault_id in metadata: {}", e)))?;
        let created_at = DateTime::parse_from_rfc3339(&Self::read_meta(&conn, "created_at")?)
            .map_err(|e| VaultError::Storage(format!("Invalid created_at timestamp: {}", e)))?
            .with_timezone(&Utc);

        let salt_bytes = hex::decode(Self::read_meta(&conn, "kdf_salt")?)
            .map_err(|e| VaultError::Storage(format!("Invalid kdf_salt in metadata: {}", e)))?;
        let kdf_salt: [u8; SALT_LEN] = salt_bytes.try_into().map_err(|_| {
            VaultError::Storage(format!("kdf_salt must be {} bytes", SALT_LEN))
        })?;

        let kdf_params = KdfParams::new(
            Self::read_meta_u32(&conn, "kdf_memory_kib")?,
            Self::read_meta_u32(&conn, "kdf_iterations")?,
            Self::read_meta_u32(&conn, "kdf_parallelism")?,
        );

        Ok(VaultMetadata {
            format_version: Self::read_meta(&conn, "format_version")?,
            vault_id,
            created_at,
            kdf_salt,
            kdf_params,
        })
    }

    fn insert(&self, entry: &NewVaultEntry) -> Result<EntryId> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let now = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO entries (site, username, password, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                entry.site,
                entry.username,
                entry.password.to_bytes(),
                entry.notes.as_ref().map(|blob| blob.to_bytes()),
                now,
            ],
        )?;
        let id = EntryId::new(tx.last_insert_rowid());
        Self::touch(&tx)?;
        tx.commit()?;

        debug!(%id, "inserted entry");
        Ok(id)
    }

    fn list(&self) -> Result<Vec<VaultEntry>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries ORDER BY id ASC",
            EntryRow::COLUMNS
        ))?;
        let rows = stmt
            .query_map([], EntryRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(VaultEntry::try_from).collect()
    }

    fn summaries(&self) -> Result<Vec<EntrySummary>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries ORDER BY id ASC",
            SummaryRow::COLUMNS
        ))?;
        let rows = stmt
            .query_map([], SummaryRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(EntrySummary::try_from).collect()
    }

    fn summary(&self, id: EntryId) -> Result<EntrySummary> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE id = ?1", SummaryRow::COLUMNS),
                [id.get()],
                SummaryRow::from_row,
            )
            .optional()?
            .ok_or(VaultError::NotFound(id))?;

        EntrySummary::try_from(row)
    }

    fn get(&self, id: EntryId) -> Result<VaultEntry> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE id = ?1", EntryRow::COLUMNS),
                [id.get()],
                EntryRow::from_row,
            )
            .optional()?
            .ok_or(VaultError::NotFound(id))?;

        VaultEntry::try_from(row)
    }

    fn delete(&self, id: EntryId) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let removed = tx.execute("DELETE FROM entries WHERE id = ?1", [id.get()])?;
        if removed == 0 {
            return Err(VaultError::NotFound(id));
        }
        Self::touch(&tx)?;
        tx.commit()?;

        debug!(%id, "deleted entry");
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let conn = self.lock_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| VaultError::Storage("Invalid entry count".to_string()))
    }

    fn check_integrity(&self) -> Result<()> {
        {
            let conn = self.lock_conn()?;

            let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            if status != "ok" {
                return Err(VaultError::Storage(format!(
                    "Integrity check failed: {}",
                    status
                )));
            }

            let min_blob = (NONCE_LEN + TAG_LEN) as i64;
            let short: Option<i64> = conn
                .query_row(
                    "SELECT id FROM entries
                     WHERE length(password) < ?1
                        OR (notes IS NOT NULL AND length(notes) < ?1)
                     ORDER BY id LIMIT 1",
                    [min_blob],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(id) = short {
                return Err(VaultError::Storage(format!(
                    "Integrity check failed: entry {} has a truncated ciphertext",
                    id
                )));
            }
        }

        let metadata = self.metadata()?;
        metadata.kdf_params.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key::test_params;
    use crate::crypto::{derive_key, encrypt, Field};
    use std::sync::Arc;
    use std::thread;

    fn sealed_entry(site: &str) -> NewVaultEntry {
        let key = derive_key("1234", b"fixed-test-salt!", &test_params()).unwrap();
        NewVaultEntry {
            site: site.to_string(),
            username: Some("alice".to_string()),
            password: encrypt(b"P@ssw0rd!", &key, Field::Password).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_insert_then_get_returns_same_blob() {
        let store = SqliteStore::open_in_memory(&test_params()).unwrap();
        let entry = sealed_entry("example.com");

        let id = store.insert(&entry).unwrap();
        let stored = store.get(id).unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.site, "example.com");
        assert_eq!(stored.username.as_deref(), Some("alice"));
        assert_eq!(stored.password, entry.password);
        assert!(stored.notes.is_none());
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[test]
    fn test_delete_then_get_not_found() {
        let store = SqliteStore::open_in_memory(&test_params()).unwrap();
        let id = store.insert(&sealed_entry("a")).unwrap();

        store.delete(id).unwrap();

        assert!(matches!(store.get(id), Err(VaultError::NotFound(missing)) if missing == id));
        assert!(matches!(store.delete(id), Err(VaultError::NotFound(_))));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = SqliteStore::open_in_memory(&test_params()).unwrap();
        let first = store.insert(&sealed_entry("a")).unwrap();
        let second = store.insert(&sealed_entry("b")).unwrap();
        store.delete(second).unwrap();

        let third = store.insert(&sealed_entry("c")).unwrap();
        assert!(third > second);
        assert!(second > first);
    }

    #[test]
    fn test_list_in_storage_order_and_stable() {
        let store = SqliteStore::open_in_memory(&test_params()).unwrap();
        for site in ["zeta", "alpha", "mid"] {
            store.insert(&sealed_entry(site)).unwrap();
        }

        let first: Vec<_> = store.list().unwrap().into_iter().map(|e| e.site).collect();
        let second: Vec<_> = store.list().unwrap().into_iter().map(|e| e.site).collect();
        assert_eq!(first, vec!["zeta", "alpha", "mid"]);
        assert_eq!(first, second);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_concurrent_inserts_get_distinct_ids() {
        let store = Arc::new(SqliteStore::open_in_memory(&test_params()).unwrap());
        let entry = sealed_entry("shared");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let entry = entry.clone();
                thread::spawn(move || {
                    (0..10)
                        .map(|_| store.insert(&entry).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<EntryId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 80);
    }

    #[test]
    fn test_metadata_round_trip() {
        let params = KdfParams::new(2048, 2, 1);
        let store = SqliteStore::open_in_memory(&params).unwrap();
        let meta = store.metadata().unwrap();

        assert_eq!(meta.format_version, FORMAT_VERSION);
        assert_eq!(meta.kdf_params, params);
        assert!(!meta.vault_id.is_nil());
        assert_ne!(meta.kdf_salt, [0u8; SALT_LEN]);
    }

    #[test]
    fn test_check_integrity_flags_truncated_blob() {
        let store = SqliteStore::open_in_memory(&test_params()).unwrap();
        let id = store.insert(&sealed_entry("a")).unwrap();
        store.check_integrity().unwrap();

        store
            .lock_conn()
            .unwrap()
            .execute(
                "UPDATE entries SET password = x'00' WHERE id = ?1",
                [id.get()],
            )
            .unwrap();

        let err = store.check_integrity().unwrap_err();
        assert!(err.to_string().contains("truncated ciphertext"));
        assert_eq!(store.summary(id).unwrap().site, "a");
        assert!(matches!(
            store.get(id),
            Err(VaultError::Decryption { entry: Some(e) }) if e == id
        ));
    }

    #[test]
    fn test_summaries_skip_sealed_columns() {
        let store = SqliteStore::open_in_memory(&test_params()).unwrap();
        let good = store.insert(&sealed_entry("good.com")).unwrap();
        let bad = store.insert(&sealed_entry("bad.com")).unwrap();
        store
            .lock_conn()
            .unwrap()
            .execute(
                "UPDATE entries SET password = x'00', notes = x'00' WHERE id = ?1",
                [bad.get()],
            )
            .unwrap();

        let summaries = store.summaries().unwrap();
        let ids: Vec<_> = summaries.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![good, bad]);
        assert!(!summaries[0].has_notes);
        assert!(summaries[1].has_notes);
        assert!(matches!(store.summary(EntryId::new(99)), Err(VaultError::NotFound(_))));

        store.delete(bad).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        store.check_integrity().unwrap();
    }
}
