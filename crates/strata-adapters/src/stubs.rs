//! Stub template stores.
//!
//! Built-in stubs are compiled into the binary. A project may override any
//! of them by dropping a file with the same name (see [`StubId::file_name`])
//! into a stub directory; the directory is taken from configuration or from
//! the `STRATA_STUBS_DIR` environment variable.

use std::path::{Path, PathBuf};

use strata_core::{
    application::{ApplicationError, ports::StubStore},
    domain::StubId,
    error::StrataResult,
};
use tracing::{debug, instrument, warn};

/// Environment variable naming an override stub directory.
pub const STUBS_DIR_ENV: &str = "STRATA_STUBS_DIR";

/// Stubs shipped with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStubStore;

impl BuiltinStubStore {
    pub fn new() -> Self {
        Self
    }

    /// Embedded text of a stub.
    pub const fn text(id: StubId) -> &'static str {
        match id {
            StubId::Job => include_str!("../stubs/job.stub"),
            StubId::JobQueueable => include_str!("../stubs/job-queueable.stub"),
            StubId::JobTest => include_str!("../stubs/job-test.stub"),
            StubId::Feature => include_str!("../stubs/feature.stub"),
            StubId::FeatureTest => include_str!("../stubs/feature-test.stub"),
            StubId::Operation => include_str!("../stubs/operation.stub"),
            StubId::OperationQueueable => include_str!("../stubs/operation-queueable.stub"),
            StubId::OperationTest => include_str!("../stubs/operation-test.stub"),
            StubId::Model => include_str!("../stubs/model.stub"),
            StubId::Model8 => include_str!("../stubs/model-8.stub"),
            StubId::Policy => include_str!("../stubs/policy.stub"),
            StubId::Request => include_str!("../stubs/request.stub"),
            StubId::ControllerResource => include_str!("../stubs/controller.resource.stub"),
            StubId::ControllerPlain => include_str!("../stubs/controller.plain.stub"),
            StubId::ServiceProvider => include_str!("../stubs/serviceprovider.stub"),
            StubId::ServiceProvider8 => include_str!("../stubs/serviceprovider-8.stub"),
            StubId::RouteServiceProvider => include_str!("../stubs/routeserviceprovider.stub"),
            StubId::BroadcastServiceProvider => {
                include_str!("../stubs/broadcastserviceprovider.stub")
            }
            StubId::RoutesApi => include_str!("../stubs/routes-api.stub"),
            StubId::RoutesWeb => include_str!("../stubs/routes-web.stub"),
            StubId::RoutesChannels => include_str!("../stubs/routes-channels.stub"),
            StubId::RoutesConsole => include_str!("../stubs/routes-console.stub"),
            StubId::WelcomeView => include_str!("../stubs/welcome.blade.stub"),
        }
    }
}

impl StubStore for BuiltinStubStore {
    fn get(&self, id: StubId) -> StrataResult<String> {
        Ok(Self::text(id).to_string())
    }
}

/// Stubs read from a directory, falling back to the built-in set for any
/// stub the directory does not provide.
#[derive(Debug, Clone)]
pub struct DirectoryStubStore {
    dir: PathBuf,
    fallback: BuiltinStubStore,
}

impl DirectoryStubStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fallback: BuiltinStubStore,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StubStore for DirectoryStubStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn get(&self, id: StubId) -> StrataResult<String> {
        let path = self.dir.join(id.file_name());
        if !path.is_file() {
            debug!(stub = %id, "No override, using built-in stub");
            return self.fallback.get(id);
        }

        debug!(path = %path.display(), "Loading stub override");
        std::fs::read_to_string(&path).map_err(|e| {
            ApplicationError::StubMissing {
                name: format!("{} ({})", path.display(), e),
            }
            .into()
        })
    }
}

/// Pick the stub store: the configured directory first, then
/// `$STRATA_STUBS_DIR`, then the built-ins.
#[instrument]
pub fn resolve(configured: Option<&Path>) -> Box<dyn StubStore> {
    let from_env = std::env::var_os(STUBS_DIR_ENV).map(PathBuf::from);

    for candidate in configured.map(Path::to_path_buf).into_iter().chain(from_env) {
        if candidate.is_dir() {
            debug!(path = %candidate.display(), "Using stub directory");
            return Box::new(DirectoryStubStore::new(candidate));
        }
        warn!(path = %candidate.display(), "Stub directory does not exist, ignoring");
    }

    Box::new(BuiltinStubStore)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn every_builtin_stub_is_present() {
        for id in StubId::ALL {
            assert!(!BuiltinStubStore::text(id).is_empty(), "{id} is empty");
        }
    }

    #[test]
    fn unit_stubs_carry_their_placeholders() {
        let job = BuiltinStubStore::text(StubId::JobQueueable);
        assert!(job.contains("{{job}}"));
        assert!(job.contains("{{namespace}}"));
        assert!(job.contains("QueueableJob"));

        let feature = BuiltinStubStore::text(StubId::Feature);
        assert!(feature.contains("{{use_jobs}}"));
        assert!(feature.contains("{{run_jobs}}"));
    }

    #[test]
    fn directory_overrides_win() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("job.stub"), "custom {{job}}").unwrap();
        let store = DirectoryStubStore::new(tmp.path());

        assert_eq!(store.get(StubId::Job).unwrap(), "custom {{job}}");
        assert_eq!(
            store.get(StubId::Policy).unwrap(),
            BuiltinStubStore::text(StubId::Policy)
        );
    }

    #[test]
    fn missing_configured_directory_falls_back() {
        let tmp = TempDir::new().unwrap();
        let store = resolve(Some(&tmp.path().join("missing")));
        assert!(store.get(StubId::Model8).unwrap().contains("HasFactory"));
    }
}
