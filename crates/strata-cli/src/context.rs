//! Wiring of adapters into an opened project.
//!
//! Every command that touches the PHP project goes through [`Workspace`]; it
//! owns the project and the adapters the core services borrow.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use strata_adapters::{ComposerManifest, LocalFileStore, PlaceholderRenderer, stubs};
use strata_core::{
    application::{
        Catalog, NamespaceRewriter, Project, ProjectInitializer, StubStore, UnitGenerator,
        UnitRemover,
    },
    domain::Layout,
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
};

/// An opened project plus the adapters the services need.
pub struct Workspace {
    base: PathBuf,
    project: Project,
    manifest: ComposerManifest,
    stubs: Box<dyn StubStore>,
    renderer: PlaceholderRenderer,
    framework_version: u32,
}

impl Workspace {
    /// Open the project named by `--project` (the current directory by
    /// default).
    #[instrument(skip_all, fields(project = %global.project.display()))]
    pub fn open(global: &GlobalArgs, config: &AppConfig) -> CliResult<Self> {
        let base = std::path::absolute(&global.project)
            .with_cli_context(|| format!("Cannot resolve {}", global.project.display()))?;
        Self::open_at(base, config)
    }

    /// Open the project rooted at `base`.
    pub fn open_at(base: PathBuf, config: &AppConfig) -> CliResult<Self> {
        let manifest = ComposerManifest::in_project(&base);
        let project = Project::open(
            &base,
            Box::new(LocalFileStore::new()),
            &manifest,
            &config.project.source_dir,
        )?;

        debug!(
            base = %base.display(),
            mode = %project.layout().mode(),
            namespace = project.layout().root_namespace(),
            "Workspace ready"
        );

        // a relative stub directory is taken from the project root
        let stub_dir = config.stubs_dir().map(|dir| base.join(dir));

        Ok(Self {
            base,
            project,
            manifest,
            stubs: stubs::resolve(stub_dir.as_deref()),
            renderer: PlaceholderRenderer::new(),
            framework_version: config.project.framework_version,
        })
    }

    /// Re-read the project after its layout changed on disk (e.g. after
    /// `init:monolith` created `Services/`).
    pub fn reopen(self, config: &AppConfig) -> CliResult<Self> {
        Self::open_at(self.base, config)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn layout(&self) -> &Layout {
        self.project.layout()
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.project)
    }

    pub fn generator(&self) -> UnitGenerator<'_> {
        UnitGenerator::new(&self.project, self.stubs.as_ref(), &self.renderer)
            .with_framework_version(self.framework_version)
    }

    pub fn remover(&self) -> UnitRemover<'_> {
        UnitRemover::new(&self.project)
    }

    pub fn initializer(&self) -> ProjectInitializer<'_> {
        ProjectInitializer::new(&self.project)
    }

    pub fn rewriter(&self) -> NamespaceRewriter<'_> {
        NamespaceRewriter::new(&self.project, &self.manifest)
    }
}
