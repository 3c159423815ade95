//! Snapshot storage backends
//!
//! A backend holds exactly one value: the serialized card collection. Reads
//! return `None` when nothing has been stored yet.

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BoardError, Result};

/// Single-key persistent storage for the board snapshot
pub trait Storage {
    /// Read the stored snapshot, `None` if absent
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored snapshot
    fn write(&self, snapshot: &str) -> Result<()>;

    /// Human readable location, for logs and CLI output
    fn describe(&self) -> String;
}

/// Snapshot kept in a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                debug!(path = %self.path.display(), bytes = content.len(), "FileStorage::read: loaded");
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "FileStorage::read: no snapshot");
                Ok(None)
            }
            Err(e) => Err(BoardError::io(&self.path, e)),
        }
    }

    /// Write and fsync a temp file in the same directory, then rename it
    /// over the target so a crash never leaves a half-written snapshot.
    fn write(&self, snapshot: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| BoardError::io(&dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| BoardError::io(&dir, e))?;
        tmp.write_all(snapshot.as_bytes())
            .map_err(|e| BoardError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| BoardError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| BoardError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), bytes = snapshot.len(), "FileStorage::write: saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Snapshot kept in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    value: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing snapshot
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(snapshot.into())),
        }
    }

    /// Current raw snapshot
    pub fn snapshot(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn write(&self, snapshot: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(snapshot.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, snapshot: &str) -> Result<()> {
        (**self).write(snapshot)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("board.json"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("board.json");
        let storage = FileStorage::new(&path);

        storage.write("[]").unwrap();
        assert!(path.exists());
        assert_eq!(storage.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_overwrites() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("board.json"));
        storage.write("first").unwrap();
        storage.write("second").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("second"));

        // no temp files left behind
        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_storage_failed_write_keeps_directory_clean() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("board.json");
        fs::create_dir(&target).unwrap();
        let storage = FileStorage::new(&target);

        let err = storage.write("[]").unwrap_err();
        assert!(matches!(err, BoardError::Io { .. }));
        assert!(target.is_dir());
        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_storage_read_error_on_directory() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        let err = storage.read().unwrap_err();
        assert!(matches!(err, BoardError::Io { .. }));
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.read().unwrap().is_none());
        storage.write("x").unwrap();
        assert_eq!(storage.snapshot().as_deref(), Some("x"));
        assert_eq!(storage.describe(), "memory");
    }
}
