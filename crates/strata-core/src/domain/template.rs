//! Stub identifiers and placeholder bindings.
//!
//! A stub is a PHP source template containing `{{name}}` placeholders. The
//! generator picks a [`StubId`], fills a [`Bindings`] map and hands both to
//! the renderer port.

use std::fmt;

/// Every stub the generators know how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubId {
    Job,
    JobQueueable,
    JobTest,
    Feature,
    FeatureTest,
    Operation,
    OperationQueueable,
    OperationTest,
    Model,
    Model8,
    Policy,
    Request,
    ControllerResource,
    ControllerPlain,
    ServiceProvider,
    ServiceProvider8,
    RouteServiceProvider,
    BroadcastServiceProvider,
    RoutesApi,
    RoutesWeb,
    RoutesChannels,
    RoutesConsole,
    WelcomeView,
}

impl StubId {
    pub const ALL: [StubId; 23] = [
        Self::Job,
        Self::JobQueueable,
        Self::JobTest,
        Self::Feature,
        Self::FeatureTest,
        Self::Operation,
        Self::OperationQueueable,
        Self::OperationTest,
        Self::Model,
        Self::Model8,
        Self::Policy,
        Self::Request,
        Self::ControllerResource,
        Self::ControllerPlain,
        Self::ServiceProvider,
        Self::ServiceProvider8,
        Self::RouteServiceProvider,
        Self::BroadcastServiceProvider,
        Self::RoutesApi,
        Self::RoutesWeb,
        Self::RoutesChannels,
        Self::RoutesConsole,
        Self::WelcomeView,
    ];

    /// File name of the stub inside a stub directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Job => "job.stub",
            Self::JobQueueable => "job-queueable.stub",
            Self::JobTest => "job-test.stub",
            Self::Feature => "feature.stub",
            Self::FeatureTest => "feature-test.stub",
            Self::Operation => "operation.stub",
            Self::OperationQueueable => "operation-queueable.stub",
            Self::OperationTest => "operation-test.stub",
            Self::Model => "model.stub",
            Self::Model8 => "model-8.stub",
            Self::Policy => "policy.stub",
            Self::Request => "request.stub",
            Self::ControllerResource => "controller.resource.stub",
            Self::ControllerPlain => "controller.plain.stub",
            Self::ServiceProvider => "serviceprovider.stub",
            Self::ServiceProvider8 => "serviceprovider-8.stub",
            Self::RouteServiceProvider => "routeserviceprovider.stub",
            Self::BroadcastServiceProvider => "broadcastserviceprovider.stub",
            Self::RoutesApi => "routes-api.stub",
            Self::RoutesWeb => "routes-web.stub",
            Self::RoutesChannels => "routes-channels.stub",
            Self::RoutesConsole => "routes-console.stub",
            Self::WelcomeView => "welcome.blade.stub",
        }
    }

    /// Model stub for a framework major version.
    pub const fn model_for(framework_version: u32) -> Self {
        if framework_version >= 8 {
            Self::Model8
        } else {
            Self::Model
        }
    }

    /// Service provider stub for a framework major version.
    pub const fn service_provider_for(framework_version: u32) -> Self {
        if framework_version >= 8 {
            Self::ServiceProvider8
        } else {
            Self::ServiceProvider
        }
    }
}

impl fmt::Display for StubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Resourceful controllers get the seven CRUD actions, plain ones none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerStyle {
    #[default]
    Resource,
    Plain,
}

impl ControllerStyle {
    pub const fn stub(self) -> StubId {
        match self {
            Self::Resource => StubId::ControllerResource,
            Self::Plain => StubId::ControllerPlain,
        }
    }
}

/// Ordered placeholder → value map.
///
/// Keys are the bare placeholder names; `{{job}}` is bound with
/// `.with("job", ...)`. Setting a key twice replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<(String, String)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
