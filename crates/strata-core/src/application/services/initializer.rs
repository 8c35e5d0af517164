//! Project Initializer - lays down the monolith or microservice skeleton.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::{application::services::project::Project, error::StrataResult};

const MONOLITH_DIRECTORIES: [&str; 7] = [
    "Services",
    "Domains",
    "Data",
    "Data/Models",
    "Policies",
    "../tests/Feature",
    "../tests/Unit",
];

const MICRO_DIRECTORIES: [&str; 7] = [
    "Domains",
    "Features",
    "Operations",
    "Data/Models",
    "Policies",
    "../tests/Feature",
    "../tests/Unit/Operations",
];

/// Creates the directory skeleton of a fresh installation.
pub struct ProjectInitializer<'a> {
    project: &'a Project,
}

impl<'a> ProjectInitializer<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Monolith skeleton. Returns the directories actually created,
    /// relative to the project base.
    #[instrument(skip(self))]
    pub fn init_monolith(&self) -> StrataResult<Vec<PathBuf>> {
        self.create(&MONOLITH_DIRECTORIES)
    }

    /// Microservice skeleton. Returns the directories actually created,
    /// relative to the project base.
    #[instrument(skip(self))]
    pub fn init_micro(&self) -> StrataResult<Vec<PathBuf>> {
        self.create(&MICRO_DIRECTORIES)
    }

    fn create(&self, directories: &[&str]) -> StrataResult<Vec<PathBuf>> {
        let layout = self.project.layout();
        let files = self.project.files();
        let mut created = Vec::new();

        for directory in directories {
            // entries starting with ../ sit next to the source directory
            let path = match directory.strip_prefix("../") {
                Some(outside) => layout.base_path().join(outside),
                None => layout.source_root().join(directory),
            };

            if files.exists(&path) {
                debug!(path = %path.display(), "Directory already present");
                continue;
            }

            files.create_dir_all(&path)?;
            files.write_file(&path.join(".gitkeep"), "")?;
            created.push(layout.relative_from_real(&path));
        }

        info!(count = created.len(), "Skeleton directories created");
        Ok(created)
    }
}
