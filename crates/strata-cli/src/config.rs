//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the individual values
//! it needs (source directory, framework version).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `STRATA_*` environment variables, `__` between nested keys
//!    (`STRATA_PROJECT__SOURCE_DIR=src`)
//! 3. Config file (`--config`, or the per-user config path when present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENV_PREFIX: &str = "STRATA";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Layout of the PHP project.
    pub project: ProjectConfig,
    /// Stub template settings.
    pub stubs: StubsConfig,
    /// Host framework migration generator.
    pub migration: MigrationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory mapped to the root namespace in `composer.json`.
    pub source_dir: String,
    /// Major version of the host framework; 8 and later select the newer
    /// model and service provider stubs.
    pub framework_version: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StubsConfig {
    /// Directory whose `*.stub` files override the built-in ones.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Command line the migration name and `--path` are appended to.
    pub command: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_dir: "app".into(),
            framework_version: strata_core::application::DEFAULT_FRAMEWORK_VERSION,
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            command: "php artisan make:migration".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. Without
    /// it the per-user config file is read when present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("project.source_dir", defaults.project.source_dir)?
            .set_default(
                "project.framework_version",
                i64::from(defaults.project.framework_version),
            )?
            .set_default("migration.command", defaults.migration.command)?
            .set_default("output.no_color", defaults.output.no_color)?;

        builder = match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                builder.add_source(File::from(path.as_path()).required(true))
            }
            None => {
                let path = Self::config_path();
                debug!(path = %path.display(), "Looking for user configuration");
                builder.add_source(File::from(path.as_path()).required(false))
            }
        };

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.strata.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".strata.toml"))
    }

    pub fn stubs_dir(&self) -> Option<&Path> {
        self.stubs.dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_laravel_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.project.source_dir, "app");
        assert_eq!(cfg.project.framework_version, 10);
        assert_eq!(cfg.migration.command, "php artisan make:migration");
        assert!(cfg.stubs_dir().is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("strata.toml");
        std::fs::write(
            &path,
            "[project]\nsource_dir = \"src\"\nframework_version = 7\n\n[stubs]\ndir = \"stubs\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.project.source_dir, "src");
        assert_eq!(cfg.project.framework_version, 7);
        assert_eq!(cfg.stubs_dir(), Some(Path::new("stubs")));
        assert_eq!(cfg.migration.command, "php artisan make:migration");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&tmp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
