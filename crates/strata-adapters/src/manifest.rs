//! `composer.json` adapter for the project manifest port.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Map;
use strata_core::{
    application::{ApplicationError, ports::ProjectManifest},
    domain::layout,
    error::{StrataError, StrataResult},
};
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const MANIFEST_FILE: &str = "composer.json";

#[derive(Debug, Error)]
enum ManifestError {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("namespace {0} is not declared in autoload.psr-4")]
    UnknownNamespace(String),
}

#[derive(Debug, Default, Deserialize)]
struct Composer {
    #[serde(default)]
    autoload: Autoload,
}

#[derive(Debug, Default, Deserialize)]
struct Autoload {
    #[serde(rename = "psr-4", default)]
    psr4: Map<String, serde_json::Value>,
}

/// The project's `composer.json`.
#[derive(Debug, Clone)]
pub struct ComposerManifest {
    path: PathBuf,
}

impl ComposerManifest {
    /// Manifest at `<base_path>/composer.json`.
    pub fn in_project(base_path: impl AsRef<Path>) -> Self {
        Self::new(base_path.as_ref().join(MANIFEST_FILE))
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, ManifestError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    fn load(&self) -> Result<Composer, ManifestError> {
        Ok(serde_json::from_str(&self.read()?)?)
    }

    fn unreadable(&self, e: ManifestError) -> StrataError {
        ApplicationError::ManifestUnreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        }
        .into()
    }
}

impl ProjectManifest for ComposerManifest {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn namespace_mapping_for(&self, directory: &str) -> StrataResult<Option<String>> {
        let composer = self.load().map_err(|e| self.unreadable(e))?;

        let entries = composer
            .autoload
            .psr4
            .iter()
            .filter_map(|(namespace, dir)| dir.as_str().map(|dir| (namespace.as_str(), dir)));
        let found = layout::match_psr4(entries, directory);

        debug!(?found, "PSR-4 lookup");
        Ok(found)
    }

    /// Rewrites the escaped `Old\\` key in place so the rest of the file
    /// keeps its formatting.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn replace_namespace(&self, old: &str, new: &str) -> StrataResult<()> {
        let content = self.read().map_err(|e| self.unreadable(e))?;

        let escaped_old = format!("\"{}\\\\\"", old.replace('\\', "\\\\"));
        let escaped_new = format!("\"{}\\\\\"", new.replace('\\', "\\\\"));
        if !content.contains(&escaped_old) {
            return Err(self.unreadable(ManifestError::UnknownNamespace(old.to_string())));
        }

        let updated = content.replace(&escaped_old, &escaped_new);
        serde_json::from_str::<Composer>(&updated)
            .map_err(|e| self.unreadable(ManifestError::Json(e)))?;

        std::fs::write(&self.path, updated).map_err(|e| {
            StrataError::from(ApplicationError::FilesystemError {
                path: self.path.clone(),
                reason: format!("Failed to write manifest: {e}"),
            })
        })?;

        info!(%old, %new, "Manifest namespace replaced");
        Ok(())
    }
}
