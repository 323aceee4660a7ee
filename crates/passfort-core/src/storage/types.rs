//! Core data types for the storage layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{KdfParams, SealedBlob, SALT_LEN};

/// Identifier assigned by the store on insert. Never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(EntryId)
    }
}

/// Metadata for a vault, stored in its `meta` table.
#[derive(Debug, Clone)]
pub struct VaultMetadata {
    /// Format version (e.g., "1")
    pub format_version: String,

    /// Random identifier for this vault
    pub vault_id: Uuid,

    /// When this vault was created
    pub created_at: DateTime<Utc>,

    /// Argon2id salt (not secret)
    pub kdf_salt: [u8; SALT_LEN],

    /// Argon2id cost parameters
    pub kdf_params: KdfParams,
}

/// A stored entry. Sensitive fields stay sealed.
#[derive(Debug, Clone)]
pub struct VaultEntry {
    pub id: EntryId,
    pub site: String,
    pub username: Option<String>,
    pub password: SealedBlob,
    pub notes: Option<SealedBlob>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An entry to insert. The store assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewVaultEntry {
    pub site: String,
    pub username: Option<String>,
    pub password: SealedBlob,
    pub notes: Option<SealedBlob>,
}

/// Non-secret view of an entry, safe to list without a PIN.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySummary {
    pub id: EntryId,
    pub site: String,
    pub username: Option<String>,
    pub has_notes: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
