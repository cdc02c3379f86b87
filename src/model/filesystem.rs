//! File loading and saving
//!
//! The editor talks to the disk through the [`FileSystem`] trait so tests can
//! swap in a failing or in-memory implementation.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Which file operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Load,
    Save,
}

/// A failed load or save
#[derive(Debug)]
pub struct FileError {
    pub path: PathBuf,
    pub operation: FileOperation,
    pub source: io::Error,
}

impl FileError {
    pub fn new(path: &Path, operation: FileOperation, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            operation,
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.operation {
            FileOperation::Load => "read",
            FileOperation::Save => "write",
        };
        write!(f, "failed to {} {}: {}", verb, self.path.display(), self.source)
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Whole-file text I/O
pub trait FileSystem: Send + Sync {
    /// Read the full content of `path` as UTF-8
    fn load(&self, path: &Path) -> Result<String, FileError>;

    /// Replace the content of `path` with `text`
    fn save(&self, path: &Path, text: &str) -> Result<(), FileError>;
}

/// The local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Write through a sibling temp file and rename it over the destination,
    /// so a failed write never truncates the original
    fn write_atomic(path: &Path, text: &str) -> io::Result<()> {
        let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(format!(".{}.tmp", std::process::id()));
        let temp_path = path.with_file_name(temp_name);

        let result = std::fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(text.as_bytes())?;
            file.sync_all()
        });
        match result {
            Ok(()) => {
                if let Ok(metadata) = std::fs::metadata(path) {
                    let _ = std::fs::set_permissions(&temp_path, metadata.permissions());
                }
                std::fs::rename(&temp_path, path).inspect_err(|_| {
                    let _ = std::fs::remove_file(&temp_path);
                })
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                // Directory not writable; fall back to writing in place
                let _ = std::fs::remove_file(&temp_path);
                std::fs::write(path, text)
            }
            Err(e) => {
                let _ = std::fs::remove_file(&temp_path);
                Err(e)
            }
        }
    }
}

impl FileSystem for StdFileSystem {
    fn load(&self, path: &Path) -> Result<String, FileError> {
        std::fs::read_to_string(path).map_err(|e| FileError::new(path, FileOperation::Load, e))
    }

    fn save(&self, path: &Path, text: &str) -> Result<(), FileError> {
        Self::write_atomic(path, text).map_err(|e| FileError::new(path, FileOperation::Save, e))
    }
}
