//! Filesystem utilities for atomic operations.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, VaultError};

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        // Best-effort replace on platforms where rename fails if target exists.
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

/// Sibling temp path for `path`, unique per process and instant.
pub(crate) fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
        .ok_or_else(|| VaultError::Storage("Invalid path".to_string()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| VaultError::Storage("Invalid filename".to_string()))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| VaultError::Storage(format!("System time error: {}", e)))?
        .as_nanos();
    Ok(parent.join(format!(
        ".{}.{}.{}.tmp",
        filename,
        std::process::id(),
        nanos
    )))
}

/// Move `temp_path` to `destination`, failing if `destination` exists.
///
/// The final step is a hard link, which never replaces an existing file.
/// Filesystems without hard links fall back to a rename after an existence
/// check. The temp file is removed either way.
pub fn persist_new(temp_path: &Path, destination: &Path) -> io::Result<()> {
    let linked = match fs::hard_link(temp_path, destination) {
        Err(err) if err.kind() != io::ErrorKind::AlreadyExists && !destination.exists() => {
            fs::rename(temp_path, destination)
        }
        other => other,
    };
    let _ = fs::remove_file(temp_path);
    linked
}

/// Create a new file readable only by its owner (mode 0600 on Unix).
pub(crate) fn create_private(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options
        .open(path)
        .map_err(|e| VaultError::Storage(format!("Temp file create failed: {}", e)))
}

/// Write `data` to `path` via a synced temp file and an atomic rename.
///
/// The file is owner-only: exports hold plaintext.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let temp_path = temp_sibling(path)?;
    let mut file = create_private(&temp_path)?;
    let written = file.write_all(data).and_then(|_| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(VaultError::Storage(format!("Temp file write failed: {}", e)));
    }
    drop(file);

    rename_with_fallback(&temp_path, path)
        .map_err(|e| VaultError::Storage(format!("Atomic rename failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_rename_overwrites_existing() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp.txt");
        let dest = dir.path().join("dest.txt");

        File::create(&dest).unwrap().write_all(b"old").unwrap();
        File::create(&temp).unwrap().write_all(b"new").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("export.csv");

        write_atomic(&dest, b"a,b\n").unwrap();
        write_atomic(&dest, b"c,d\n").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "c,d\n");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let dest = dir.path().join("export.csv");
        write_atomic(&dest, b"secret").unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_persist_new_never_replaces() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("vault.db");
        let first = dir.path().join("first.tmp");
        let second = dir.path().join("second.tmp");
        fs::write(&first, b"first").unwrap();
        fs::write(&second, b"second").unwrap();

        persist_new(&first, &dest).unwrap();
        let err = persist_new(&second, &dest).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&dest).unwrap(), b"first");
        assert!(!first.exists());
        assert!(!second.exists());
    }
}
