//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `strata-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Bindings, StubId, UnitStarted};
use crate::error::StrataResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFileStore` (production)
/// - `strata_adapters::filesystem::MemoryFileStore` (testing)
///
/// ## Design Notes
///
/// - Paths are absolute; the [`Layout`](crate::domain::Layout) computes them
/// - Listing results are sorted so that every caller sees a stable order
/// - A missing directory lists as empty rather than failing
#[cfg_attr(test, mockall::automock)]
pub trait FileStore: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> StrataResult<String>;

    /// Write content to a file, replacing it if present. The parent
    /// directory must exist.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Remove a file, or a directory with all of its contents.
    fn remove(&self, path: &Path) -> StrataResult<()>;

    /// Move a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> StrataResult<()>;

    /// Immediate sub-directories of `path`, sorted.
    fn list_dirs(&self, path: &Path) -> StrataResult<Vec<PathBuf>>;

    /// Immediate files of `path`, sorted.
    fn list_files(&self, path: &Path) -> StrataResult<Vec<PathBuf>>;

    /// Every file below `root` at any depth, sorted.
    fn walk_files(&self, root: &Path) -> StrataResult<Vec<PathBuf>>;
}

/// Port for the project manifest (`composer.json`).
pub trait ProjectManifest: Send + Sync {
    /// Namespace prefix whose PSR-4 autoload directory is `<directory>/`,
    /// without the trailing separator.
    fn namespace_mapping_for(&self, directory: &str) -> StrataResult<Option<String>>;

    /// Replace the `old` namespace prefix with `new` in the autoload
    /// sections.
    fn replace_namespace(&self, old: &str, new: &str) -> StrataResult<()>;
}

/// Port for stub template lookup.
///
/// Implemented by:
/// - `strata_adapters::stubs::BuiltinStubStore` (stubs compiled into the binary)
/// - `strata_adapters::stubs::DirectoryStubStore` (user-provided stub directory)
pub trait StubStore: Send + Sync {
    /// Raw template text for a stub.
    fn get(&self, id: StubId) -> StrataResult<String>;
}

/// Port for template rendering.
pub trait TemplateRenderer: Send + Sync {
    /// Substitute every `{{key}}` placeholder bound in `bindings`.
    fn render(&self, template: &str, bindings: &Bindings) -> StrataResult<String>;
}

/// Port for unit lifecycle events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &UnitStarted) -> StrataResult<()>;
}
