//! Persistence backends for the social state document.
//!
//! The store reads and writes the whole document as one serialized string;
//! backends only move that string and know nothing about its contents.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

/// Storage for the serialized social state document.
///
/// `load` returns `Ok(None)` when nothing has been persisted yet.
pub trait StateBackend: Send + Sync {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, raw: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed state storage: one JSON document in a single file.
#[derive(Clone, Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the file the document is stored in.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StateBackend for FileBackend {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(self.path.clone(), e)),
        }
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        // Ensure the data directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::IoError(parent.to_path_buf(), e))?;
        }
        fs::write(&self.path, raw).map_err(|e| StorageError::IoError(self.path.clone(), e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(self.path.clone(), e)),
        }
    }
}

/// In-memory state storage for tests and execution contexts with no
/// filesystem.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: RwLock<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let slot = self.slot.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        let mut slot = self.slot.write().map_err(|_| StorageError::LockPoisoned)?;
        *slot = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self.slot.write().map_err(|_| StorageError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}

/// Errors that can occur while moving the document in and out of storage.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing the state file.
    IoError(PathBuf, io::Error),
    /// A lock guarding in-memory state was poisoned.
    LockPoisoned,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::LockPoisoned => write!(f, "state lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
            StorageError::LockPoisoned => None,
        }
    }
}
