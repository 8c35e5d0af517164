//! Local filesystem adapter using std::fs and walkdir.

use std::io;
use std::path::{Path, PathBuf};

use strata_core::{
    application::{ApplicationError, ports::FileStore},
    error::{StrataError, StrataResult},
};
use walkdir::WalkDir;

/// Production file store implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFileStore;

impl LocalFileStore {
    /// Create a new local file store adapter.
    pub fn new() -> Self {
        Self
    }

    fn entries(&self, path: &Path, dirs: bool) -> StrataResult<Vec<PathBuf>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))? {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let entry_path = entry.path();
            if entry_path.is_dir() == dirs {
                entries.push(entry_path);
            }
        }
        entries.sort();
        Ok(entries)
    }
}

impl Default for LocalFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for LocalFileStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> StrataResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove(&self, path: &Path) -> StrataResult<()> {
        if path.is_dir() {
            std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
        } else {
            std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> StrataResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn list_dirs(&self, path: &Path) -> StrataResult<Vec<PathBuf>> {
        self.entries(path, true)
    }

    fn list_files(&self, path: &Path) -> StrataResult<Vec<PathBuf>> {
        self.entries(path, false)
    }

    fn walk_files(&self, root: &Path) -> StrataResult<Vec<PathBuf>> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                map_io_error(&path, e.into(), "walk directory")
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StrataError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
