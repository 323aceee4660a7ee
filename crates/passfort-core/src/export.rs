//! Vault export.
//!
//! Exports are CSV with a fixed header and every field double-quoted:
//!
//! ```text
//! Site,Username,Password,Notes,Created,Updated
//! "example.com","alice","P@ssw0rd!","","2026-01-01T00:00:00+00:00","2026-01-01T00:00:00+00:00"
//! ```
//!
//! The output holds plaintext passwords. [`seal_export`] wraps it in Age
//! passphrase encryption for callers that want the artifact protected at rest.

use std::io::{Read, Write};
use std::iter;

use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::crypto::validate_pin;
use crate::error::{Result, VaultError};
use crate::vault::DecryptedEntry;

/// Header row, written unquoted.
pub const CSV_HEADER: &str = "Site,Username,Password,Notes,Created,Updated";

/// Render decrypted entries as CSV.
pub fn write_csv(entries: &[DecryptedEntry]) -> Result<Zeroizing<Vec<u8>>> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(CSV_HEADER.as_bytes());
    buffer.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buffer);

    for entry in entries {
        let created = entry.created_at.to_rfc3339();
        let updated = entry.updated_at.to_rfc3339();
        writer
            .write_record([
                entry.site.as_str(),
                entry.username.as_deref().unwrap_or(""),
                entry.password.as_str(),
                entry.notes.as_deref().map(|n| n.as_str()).unwrap_or(""),
                created.as_str(),
                updated.as_str(),
            ])
            .map_err(|e| VaultError::Storage(format!("CSV write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| VaultError::Storage(format!("CSV flush failed: {}", e)))?;
    Ok(Zeroizing::new(bytes))
}

/// Encrypt export bytes with Age passphrase encryption (scrypt-based).
///
/// # Errors
///
/// Returns `VaultError::InvalidPin` if the passphrase is too short and
/// `VaultError::Crypto` if encryption fails.
pub fn seal_export(data: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    validate_pin(passphrase)?;
    let encryptor =
        age::Encryptor::with_user_passphrase(SecretString::from(passphrase.to_string()));

    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut encrypted)
        .map_err(|e| VaultError::Crypto(format!("Failed to create encryptor: {}", e)))?;
    writer
        .write_all(data)
        .map_err(|e| VaultError::Crypto(format!("Encryption write failed: {}", e)))?;
    writer
        .finish()
        .map_err(|e| VaultError::Crypto(format!("Encryption finish failed: {}", e)))?;

    Ok(encrypted)
}

/// Decrypt an export produced by [`seal_export`].
///
/// # Errors
///
/// Returns `VaultError::Decryption` if the passphrase is wrong or the data
/// was altered.
pub fn unseal_export(encrypted: &[u8], passphrase: &str) -> Result<Zeroizing<Vec<u8>>> {
    let decryptor = age::Decryptor::new(encrypted)
        .map_err(|e| VaultError::Crypto(format!("Failed to create decryptor: {}", e)))?;

    let identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_string()));
    let mut reader = decryptor
        .decrypt(iter::once(&identity as &dyn age::Identity))
        .map_err(|e| match e {
            age::DecryptError::NoMatchingKeys
            | age::DecryptError::DecryptionFailed
            | age::DecryptError::KeyDecryptionFailed => VaultError::decryption(),
            _ => VaultError::Crypto(format!("Decryption failed: {}", e)),
        })?;

    let mut decrypted = Zeroizing::new(Vec::new());
    reader
        .read_to_end(&mut decrypted)
        .map_err(|_| VaultError::decryption())?;

    Ok(decrypted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EntryId;
    use chrono::{TimeZone, Utc};

    fn entry(site: &str, username: Option<&str>, password: &str, notes: Option<&str>) -> DecryptedEntry {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        DecryptedEntry {
            id: EntryId::new(1),
            site: site.to_string(),
            username: username.map(str::to_string),
            password: Zeroizing::new(password.to_string()),
            notes: notes.map(|n| Zeroizing::new(n.to_string())),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let csv = write_csv(&[]).unwrap();
        assert_eq!(csv.as_slice(), b"Site,Username,Password,Notes,Created,Updated\n");
    }

    #[test]
    fn test_rows_are_fully_quoted() {
        let csv = write_csv(&[entry("example.com", Some("alice"), "P@ssw0rd!", None)]).unwrap();
        let text = String::from_utf8(csv.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "\"example.com\",\"alice\",\"P@ssw0rd!\",\"\",\"2026-01-02T03:04:05+00:00\",\"2026-01-02T03:04:05+00:00\""
        );
    }

    #[test]
    fn test_embedded_quotes_and_commas_escaped() {
        let csv = write_csv(&[entry("a,b", None, "p\"w", Some("line1\nline2"))]).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "a,b");
        assert_eq!(&record[1], "");
        assert_eq!(&record[2], "p\"w");
        assert_eq!(&record[3], "line1\nline2");
    }

    #[test]
    fn test_seal_unseal_round_trip() {
        let sealed = seal_export(b"Site,Username\n", "export-pass").unwrap();
        assert_ne!(sealed.as_slice(), b"Site,Username\n");

        let opened = unseal_export(&sealed, "export-pass").unwrap();
        assert_eq!(opened.as_slice(), b"Site,Username\n");
    }

    #[test]
    fn test_unseal_wrong_passphrase() {
        let sealed = seal_export(b"data", "export-pass").unwrap();
        assert!(matches!(
            unseal_export(&sealed, "other-pass"),
            Err(VaultError::Decryption { .. })
        ));
    }

    #[test]
    fn test_seal_rejects_short_passphrase() {
        assert!(matches!(
            seal_export(b"data", "abc"),
            Err(VaultError::InvalidPin(_))
        ));
    }
}
