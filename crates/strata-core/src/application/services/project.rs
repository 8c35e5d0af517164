//! The opened project: its [`Layout`] plus the file store every service
//! reads and writes through.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{FileStore, ProjectManifest},
    },
    domain::{InstallMode, Layout, Owner, UnitDescriptor, UnitKind, naming},
    error::StrataResult,
};

const SERVICES_DIR: &str = "Services";

/// A project on disk.
///
/// Shared by [`Catalog`](super::Catalog), [`UnitGenerator`](super::UnitGenerator),
/// [`UnitRemover`](super::UnitRemover) and friends, which all borrow it.
pub struct Project {
    layout: Layout,
    files: Box<dyn FileStore>,
}

impl Project {
    /// Open the project rooted at `base_path`.
    ///
    /// The root namespace comes from the manifest's PSR-4 entry for
    /// `source_dir`; the install mode from the presence of
    /// `<source_dir>/Services`.
    #[instrument(skip_all, fields(base = %base_path.as_ref().display(), source_dir = %source_dir))]
    pub fn open(
        base_path: impl AsRef<Path>,
        files: Box<dyn FileStore>,
        manifest: &dyn ProjectManifest,
        source_dir: &str,
    ) -> StrataResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        let root_namespace = manifest
            .namespace_mapping_for(source_dir)?
            .filter(|ns| !ns.trim_matches('\\').is_empty())
            .ok_or_else(|| ApplicationError::NamespaceNotConfigured {
                directory: source_dir.to_string(),
            })?;

        let mode = if files.is_dir(&base_path.join(source_dir).join(SERVICES_DIR)) {
            InstallMode::Monolith
        } else {
            InstallMode::Microservice
        };

        debug!(%root_namespace, %mode, "Project opened");
        Ok(Self::new(
            Layout::new(base_path, source_dir, root_namespace, mode),
            files,
        ))
    }

    pub fn new(layout: Layout, files: Box<dyn FileStore>) -> Self {
        Self { layout, files }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn files(&self) -> &dyn FileStore {
        self.files.as_ref()
    }

    /// Build the descriptor of a unit file found below `root`.
    pub(crate) fn describe_file(
        &self,
        kind: UnitKind,
        root: &Path,
        path: &Path,
        namespace: String,
        owner: Option<Owner>,
        load_content: bool,
    ) -> StrataResult<UnitDescriptor> {
        let class_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let mut builder = UnitDescriptor::builder(kind)
            .title(naming::title(kind, &class_name))
            .file_name(relative_name(root, path))
            .class_name(class_name)
            .namespace(namespace)
            .paths(self.layout.relative_from_real(path), path)
            .maybe_owner(owner);

        if load_content {
            builder = builder.content(self.files.read_to_string(path)?);
        }

        Ok(builder.build()?)
    }
}

/// `/`-separated path of `path` below `root`, e.g. `Billing/CreateInvoiceFeature.php`.
pub(crate) fn relative_name(root: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Last path component as UTF-8.
pub(crate) fn dir_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
