//! Lifecycle events published when a unit starts running.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::UnitKind;

/// A feature, operation or job has started, with the arguments it was
/// dispatched with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitStarted {
    kind: UnitKind,
    class_name: String,
    arguments: BTreeMap<String, Value>,
}

impl UnitStarted {
    pub fn new(kind: UnitKind, class_name: impl Into<String>) -> Self {
        Self {
            kind,
            class_name: class_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn feature(name: impl Into<String>) -> Self {
        Self::new(UnitKind::Feature, name)
    }

    pub fn operation(name: impl Into<String>) -> Self {
        Self::new(UnitKind::Operation, name)
    }

    pub fn job(name: impl Into<String>) -> Self {
        Self::new(UnitKind::Job, name)
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn arguments(&self) -> &BTreeMap<String, Value> {
        &self.arguments
    }

    /// `FeatureStarted`, `OperationStarted`, `JobStarted`, ...
    pub fn event_name(&self) -> String {
        format!("{}Started", self.kind)
    }
}
