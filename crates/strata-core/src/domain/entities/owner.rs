//! Containers that own units: services (features, operations, controllers)
//! and domains (jobs, requests).

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A service directory under `<src>/Services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    name: String,
    slug: String,
    relative_path: PathBuf,
    absolute_path: PathBuf,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        relative_path: impl Into<PathBuf>,
        absolute_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            relative_path: relative_path.into(),
            absolute_path: absolute_path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// snake_case form of the name, used in route prefixes and view namespaces.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Name or slug match, as accepted by every `--service` argument.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.slug == name
    }
}

/// A domain directory under `<src>/Domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    name: String,
    namespace: String,
    relative_path: PathBuf,
    absolute_path: PathBuf,
}

impl Domain {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        relative_path: impl Into<PathBuf>,
        absolute_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            relative_path: relative_path.into(),
            absolute_path: absolute_path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }
}

/// The container a unit belongs to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Owner {
    Service(Service),
    Domain(Domain),
}

impl Owner {
    pub fn name(&self) -> &str {
        match self {
            Self::Service(s) => s.name(),
            Self::Domain(d) => d.name(),
        }
    }
}
