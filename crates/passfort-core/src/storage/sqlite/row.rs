//! Entry row type for database queries.

use chrono::{DateTime, Utc};

use crate::crypto::SealedBlob;
use crate::error::{Result, VaultError};
use crate::storage::types::{EntryId, EntrySummary, VaultEntry};

/// Raw row data from the entries table, before parsing into domain types.
#[derive(Debug)]
pub struct EntryRow {
    pub id: i64,
    pub site: String,
    pub username: Option<String>,
    pub password: Vec<u8>,
    pub notes: Option<Vec<u8>>,
    pub created_at: String,
    pub updated_at: String,
}

impl EntryRow {
    pub const COLUMNS: &'static str =
        "id, site, username, password, notes, created_at, updated_at";

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            site: row.get(1)?,
            username: row.get(2)?,
            password: row.get(3)?,
            notes: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

/// Row data for listings. Sealed columns are never selected.
#[derive(Debug)]
pub struct SummaryRow {
    pub id: i64,
    pub site: String,
    pub username: Option<String>,
    pub has_notes: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl SummaryRow {
    pub const COLUMNS: &'static str =
        "id, site, username, notes IS NOT NULL, created_at, updated_at";

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            site: row.get(1)?,
            username: row.get(2)?,
            has_notes: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| VaultError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

impl TryFrom<EntryRow> for VaultEntry {
    type Error = VaultError;

    /// A blob too short to authenticate is reported as a decryption failure
    /// of that entry, the same way a tampered one would be.
    fn try_from(row: EntryRow) -> Result<Self> {
        let id = EntryId::new(row.id);
        let password = SealedBlob::from_bytes(&row.password).map_err(|e| e.for_entry(id))?;
        let notes = row
            .notes
            .as_deref()
            .map(|bytes| SealedBlob::from_bytes(bytes).map_err(|e| e.for_entry(id)))
            .transpose()?;

        Ok(VaultEntry {
            id,
            site: row.site,
            username: row.username,
            password,
            notes,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

impl TryFrom<SummaryRow> for EntrySummary {
    type Error = VaultError;

    fn try_from(row: SummaryRow) -> Result<Self> {
        Ok(EntrySummary {
            id: EntryId::new(row.id),
            site: row.site,
            username: row.username,
            has_notes: row.has_notes,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}
