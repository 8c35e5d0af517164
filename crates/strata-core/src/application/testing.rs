//! In-crate fakes for service tests.
//!
//! The real in-memory adapters live in `strata-adapters`, which depends on
//! this crate, so unit tests here use these small stand-ins instead.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::ApplicationError;
use crate::application::ports::{FileStore, ProjectManifest, StubStore, TemplateRenderer};
use crate::domain::{Bindings, InstallMode, Layout, StubId};
use crate::error::StrataResult;

use super::services::Project;

/// `None` marks a directory.
#[derive(Clone, Default)]
pub struct FakeFiles {
    entries: Arc<Mutex<BTreeMap<PathBuf, Option<String>>>>,
}

impl FakeFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(self, path: &str) -> Self {
        self.mkdirs(Path::new(path));
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            self.mkdirs(parent);
        }
        self.entries
            .lock()
            .unwrap()
            .insert(path, Some(content.to_string()));
        self
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(Path::new(path))
            .cloned()
            .flatten()
    }

    pub fn file_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.is_some())
            .count()
    }

    fn mkdirs(&self, path: &Path) {
        let mut entries = self.entries.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            entries.entry(ancestor.to_path_buf()).or_insert(None);
        }
    }

    fn children(&self, path: &Path, dirs: bool) -> Vec<PathBuf> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, v)| p.parent() == Some(path) && v.is_none() == dirs)
            .map(|(p, _)| p.clone())
            .collect()
    }
}

impl FileStore for FakeFiles {
    fn exists(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries.lock().unwrap().get(path), Some(None))
    }

    fn read_to_string(&self, path: &Path) -> StrataResult<String> {
        self.entries
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .flatten()
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "no such file".into(),
                }
                .into()
            })
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        let parent_exists = path.parent().is_some_and(|p| self.is_dir(p));
        if !parent_exists {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "parent directory missing".into(),
            }
            .into());
        }
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Some(content.to_string()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        self.mkdirs(path);
        Ok(())
    }

    fn remove(&self, path: &Path) -> StrataResult<()> {
        self.entries
            .lock()
            .unwrap()
            .retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> StrataResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let moved: Vec<_> = entries
            .iter()
            .filter(|(p, _)| p.starts_with(from))
            .map(|(p, v)| (p.clone(), v.clone()))
            .collect();
        for (path, value) in moved {
            entries.remove(&path);
            let suffix = path.strip_prefix(from).unwrap_or(Path::new(""));
            entries.insert(to.join(suffix), value);
        }
        Ok(())
    }

    fn list_dirs(&self, path: &Path) -> StrataResult<Vec<PathBuf>> {
        Ok(self.children(path, true))
    }

    fn list_files(&self, path: &Path) -> StrataResult<Vec<PathBuf>> {
        Ok(self.children(path, false))
    }

    fn walk_files(&self, root: &Path) -> StrataResult<Vec<PathBuf>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, v)| v.is_some() && p.starts_with(root))
            .map(|(p, _)| p.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct FakeManifest {
    namespace: Option<String>,
    reject_replace: bool,
    pub replaced: Mutex<Vec<(String, String)>>,
}

impl FakeManifest {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            ..Self::default()
        }
    }

    /// The mapping resolves but the autoload key cannot be rewritten.
    pub fn rejecting_replace(mut self) -> Self {
        self.reject_replace = true;
        self
    }

    pub fn missing() -> Self {
        Self::default()
    }
}

impl ProjectManifest for FakeManifest {
    fn namespace_mapping_for(&self, _directory: &str) -> StrataResult<Option<String>> {
        Ok(self.namespace.clone())
    }

    fn replace_namespace(&self, old: &str, new: &str) -> StrataResult<()> {
        if self.reject_replace {
            return Err(ApplicationError::ManifestUnreadable {
                path: PathBuf::from("/project/composer.json"),
                reason: format!("no autoload entry for {old}"),
            }
            .into());
        }
        self.replaced
            .lock()
            .unwrap()
            .push((old.to_string(), new.to_string()));
        Ok(())
    }
}

/// Every stub is just its own file name.
pub struct FakeStubs;

impl StubStore for FakeStubs {
    fn get(&self, id: StubId) -> StrataResult<String> {
        Ok(format!("stub:{}\n", id.file_name()))
    }
}

/// Appends `key=value` lines instead of substituting, so tests can see
/// exactly what was bound.
pub struct FakeRenderer;

impl TemplateRenderer for FakeRenderer {
    fn render(&self, template: &str, bindings: &Bindings) -> StrataResult<String> {
        let mut out = template.to_string();
        for (key, value) in bindings.iter() {
            out.push_str(&format!("{key}={value}\n"));
        }
        Ok(out)
    }
}

pub fn monolith(files: &FakeFiles) -> Project {
    project(files, InstallMode::Monolith)
}

pub fn microservice(files: &FakeFiles) -> Project {
    project(files, InstallMode::Microservice)
}

fn project(files: &FakeFiles, mode: InstallMode) -> Project {
    Project::new(
        Layout::new("/project", "app", "App", mode),
        Box::new(files.clone()),
    )
}
