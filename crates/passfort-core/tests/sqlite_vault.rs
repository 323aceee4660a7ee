use std::fs;

use passfort_core::crypto::KdfParams;
use passfort_core::export::{seal_export, unseal_export, CSV_HEADER};
use passfort_core::storage::{EntryStore, SqliteStore};
use passfort_core::{EntryId, VaultError, VaultService};
use tempfile::tempdir;

fn fast_params() -> KdfParams {
    KdfParams::new(1024, 1, 1)
}

#[test]
fn test_create_open_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("vault.db");

    let store = SqliteStore::create(&path, &fast_params()).expect("create should succeed");
    let vault_id = store.metadata().expect("metadata").vault_id;
    drop(store);
    assert!(path.exists());

    let reopened = SqliteStore::open(&path).expect("open should succeed");
    let metadata = reopened.metadata().expect("metadata");
    assert_eq!(metadata.vault_id, vault_id);
    assert_eq!(metadata.kdf_params, fast_params());
    reopened.check_integrity().expect("fresh vault is consistent");
}

#[test]
fn test_create_refuses_existing_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("vault.db");
    fs::write(&path, b"not a vault").expect("write");

    let result = SqliteStore::create(&path, &fast_params());
    assert!(matches!(result, Err(VaultError::Storage(_))));
    assert_eq!(fs::read(&path).expect("read"), b"not a vault");
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("missing.db");

    let result = SqliteStore::open(&path);
    assert!(matches!(result, Err(VaultError::VaultNotFound(_))));
    assert!(!path.exists());
}

#[test]
fn test_open_garbage_file_fails() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("garbage.db");
    fs::write(&path, vec![0x42u8; 4096]).expect("write");

    assert!(matches!(SqliteStore::open(&path), Err(VaultError::Storage(_))));
}

#[test]
fn test_end_to_end_pin_behavior() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("vault.db");
    let vault = VaultService::new(SqliteStore::create(&path, &fast_params()).expect("create"));

    let id = vault
        .save("example.com", Some("alice"), "P@ssw0rd!", "1234", Some(""))
        .expect("save");

    let entry = vault.get(id, "1234").expect("correct PIN decrypts");
    assert_eq!(entry.password.as_str(), "P@ssw0rd!");

    assert!(matches!(
        vault.get(id, "9999"),
        Err(VaultError::Decryption { .. })
    ));
    assert!(matches!(
        vault.get(EntryId::new(9_999_999), "1234"),
        Err(VaultError::NotFound(_))
    ));
}

#[test]
fn test_entries_survive_reopen_and_no_plaintext_on_disk() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("vault.db");

    let id = {
        let vault =
            VaultService::new(SqliteStore::create(&path, &fast_params()).expect("create"));
        vault
            .save(
                "bank.example",
                Some("alice"),
                "Sup3rSecretPassw0rd",
                "1234",
                Some("memorable-note-text"),
            )
            .expect("save")
    };

    let raw = fs::read(&path).expect("read vault file");
    let raw_text = String::from_utf8_lossy(&raw);
    assert!(raw_text.contains("bank.example"));
    assert!(!raw_text.contains("Sup3rSecretPassw0rd"));
    assert!(!raw_text.contains("memorable-note-text"));

    let vault = VaultService::new(SqliteStore::open(&path).expect("reopen"));
    let entry = vault.get(id, "1234").expect("decrypt after reopen");
    assert_eq!(entry.password.as_str(), "Sup3rSecretPassw0rd");
}

#[test]
fn test_same_pin_different_vaults_different_keys() {
    let dir = tempdir().expect("tempdir");
    let first = VaultService::new(
        SqliteStore::create(&dir.path().join("a.db"), &fast_params()).expect("create a"),
    );
    let second = VaultService::new(
        SqliteStore::create(&dir.path().join("b.db"), &fast_params()).expect("create b"),
    );

    assert_ne!(
        first.store().metadata().expect("meta a").kdf_salt,
        second.store().metadata().expect("meta b").kdf_salt
    );

    // A blob from one vault must not open in the other, even with the same PIN
    let id = first.save("site", None, "pw", "1234", None).expect("save");
    let foreign = first.store().get(id).expect("get");
    let moved = second
        .store()
        .insert(&passfort_core::storage::NewVaultEntry {
            site: foreign.site,
            username: None,
            password: foreign.password,
            notes: None,
        })
        .expect("insert");
    assert!(matches!(
        second.get(moved, "1234"),
        Err(VaultError::Decryption { .. })
    ));
}

#[test]
fn test_export_csv_and_sealed_export() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("vault.db");
    let vault = VaultService::new(SqliteStore::create(&path, &fast_params()).expect("create"));

    vault
        .save("a.com", Some("al"), "pw-one", "1234", Some("first"))
        .expect("save a");
    vault.save("b.com", None, "pw-two", "1234", None).expect("save b");

    let csv = vault.export_all("1234").expect("export");
    let text = String::from_utf8(csv.to_vec()).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[1].starts_with("\"a.com\",\"al\",\"pw-one\",\"first\","));
    assert!(lines[2].starts_with("\"b.com\",\"\",\"pw-two\",\"\","));

    let sealed = seal_export(&csv, "export-passphrase").expect("seal");
    let opened = unseal_export(&sealed, "export-passphrase").expect("unseal");
    assert_eq!(opened.as_slice(), csv.as_slice());
}

#[test]
fn test_export_of_empty_vault_is_header_only() {
    let vault = VaultService::new(SqliteStore::open_in_memory(&fast_params()).expect("store"));
    let csv = vault.export_all("1234").expect("export");
    assert_eq!(csv.as_slice(), format!("{}\n", CSV_HEADER).as_bytes());
}

#[test]
fn test_truncated_record_still_listed_and_deletable() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("vault.db");
    let vault = VaultService::new(SqliteStore::create(&path, &fast_params()).expect("create"));
    let good = vault
        .save("good.com", None, "pw-good", "1234", None)
        .expect("save good");
    let bad = vault
        .save("bad.com", None, "pw-bad", "1234", None)
        .expect("save bad");

    rusqlite::Connection::open(&path)
        .expect("open raw")
        .execute(
            "UPDATE entries SET password = x'00' WHERE id = ?1",
            [bad.get()],
        )
        .expect("corrupt");

    let sites: Vec<_> = vault
        .list()
        .expect("list needs no ciphertext")
        .into_iter()
        .map(|s| s.site)
        .collect();
    assert_eq!(sites, vec!["good.com", "bad.com"]);
    assert!(matches!(
        vault.get(bad, "1234"),
        Err(VaultError::Decryption { entry: Some(e) }) if e == bad
    ));
    assert!(vault.store().check_integrity().is_err());

    vault.remove(bad).expect("corrupt entry can be deleted");
    vault.store().check_integrity().expect("clean after delete");
    assert_eq!(vault.get(good, "1234").expect("get").password.as_str(), "pw-good");
}

#[cfg(unix)]
#[test]
fn test_created_vault_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("vault.db");
    drop(SqliteStore::create(&path, &fast_params()).expect("create"));

    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    let leftovers = fs::read_dir(dir.path())
        .expect("read_dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}
