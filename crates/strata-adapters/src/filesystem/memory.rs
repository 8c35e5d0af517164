//! In-memory file store adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use strata_core::{
    application::{ApplicationError, ports::FileStore},
    error::StrataResult,
};

/// In-memory file store for testing.
///
/// Clones share the same contents, so a test can hand one clone to a
/// `Project` and inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFileStore {
    inner: Arc<RwLock<MemoryFileStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryFileStoreInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFileStoreInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFileStore {
    /// Create a new empty memory file store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFileStoreInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dirs(parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Seed a directory and its parents (testing helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_dirs(path.as_ref());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All file paths, sorted.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> StrataResult<std::sync::RwLockReadGuard<'_, MemoryFileStoreInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> StrataResult<std::sync::RwLockWriteGuard<'_, MemoryFileStoreInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for MemoryFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> StrataResult<String> {
        self.read()?.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "File does not exist".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        self.write()?.add_dirs(path);
        Ok(())
    }

    fn remove(&self, path: &Path) -> StrataResult<()> {
        let mut inner = self.write()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> StrataResult<()> {
        let mut inner = self.write()?;

        let moved_files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter(|(p, _)| p.starts_with(from))
            .map(|(p, c)| (p.clone(), c.clone()))
            .collect();
        let moved_dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();

        if moved_files.is_empty() && moved_dirs.is_empty() {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Nothing to rename".into(),
            }
            .into());
        }

        for dir in moved_dirs {
            inner.directories.remove(&dir);
            let target = to.join(dir.strip_prefix(from).unwrap_or(Path::new("")));
            inner.add_dirs(&target);
        }
        for (file, content) in moved_files {
            inner.files.remove(&file);
            let target = to.join(file.strip_prefix(from).unwrap_or(Path::new("")));
            if let Some(parent) = target.parent() {
                inner.add_dirs(parent);
            }
            inner.files.insert(target, content);
        }
        Ok(())
    }

    fn list_dirs(&self, path: &Path) -> StrataResult<Vec<PathBuf>> {
        Ok(self
            .read()?
            .directories
            .iter()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn list_files(&self, path: &Path) -> StrataResult<Vec<PathBuf>> {
        Ok(self
            .read()?
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn walk_files(&self, root: &Path) -> StrataResult<Vec<PathBuf>> {
        Ok(self
            .read()?
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }
}
