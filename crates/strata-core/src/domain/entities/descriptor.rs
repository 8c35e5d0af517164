//! The `UnitDescriptor` value and its builder.
//!
//! A descriptor is what every generate, find and list operation hands back:
//! where a unit lives, what it is called and which namespace it declares.
//! Descriptors are immutable once built.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    UnitKind,
    entities::{Domain, Owner, Service},
    error::DomainError,
};

/// Metadata of a generated or discovered unit file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitDescriptor {
    kind: UnitKind,
    title: String,
    class_name: String,
    file_name: String,
    namespace: String,
    relative_path: PathBuf,
    absolute_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl UnitDescriptor {
    pub fn builder(kind: UnitKind) -> UnitDescriptorBuilder {
        UnitDescriptorBuilder::new(kind)
    }

    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Human readable name, e.g. "Create Invoice".
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// File name relative to the unit's root directory. Features nested in
    /// sub-directories keep them here (`Billing/CreateInvoiceFeature.php`).
    pub fn file_name(&self) -> &str {
        &self.file_name
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

    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    pub fn service(&self) -> Option<&Service> {
        match &self.owner {
            Some(Owner::Service(service)) => Some(service),
            _ => None,
        }
    }

    pub fn domain(&self) -> Option<&Domain> {
        match &self.owner {
            Some(Owner::Domain(domain)) => Some(domain),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn qualified_name(&self) -> String {
        format!("{}\\{}", self.namespace, self.class_name)
    }
}

impl fmt::Display for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.class_name, self.relative_path.display())
    }
}

/// Builder for [`UnitDescriptor`].
///
/// `class_name`, `namespace` and both paths are required. The file name
/// defaults to `<class_name>.php` and the title to an empty string.
#[derive(Debug, Clone)]
pub struct UnitDescriptorBuilder {
    kind: UnitKind,
    title: Option<String>,
    class_name: Option<String>,
    file_name: Option<String>,
    namespace: Option<String>,
    relative_path: Option<PathBuf>,
    absolute_path: Option<PathBuf>,
    owner: Option<Owner>,
    content: Option<String>,
}

impl UnitDescriptorBuilder {
    fn new(kind: UnitKind) -> Self {
        Self {
            kind,
            title: None,
            class_name: None,
            file_name: None,
            namespace: None,
            relative_path: None,
            absolute_path: None,
            owner: None,
            content: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn paths(mut self, relative: impl Into<PathBuf>, absolute: impl Into<PathBuf>) -> Self {
        self.relative_path = Some(relative.into());
        self.absolute_path = Some(absolute.into());
        self
    }

    pub fn owner(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn maybe_owner(mut self, owner: Option<Owner>) -> Self {
        self.owner = owner;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn build(self) -> Result<UnitDescriptor, DomainError> {
        let class_name = self
            .class_name
            .ok_or(DomainError::MissingRequiredField { field: "class_name" })?;
        let namespace = self
            .namespace
            .ok_or(DomainError::MissingRequiredField { field: "namespace" })?;
        let relative_path = self
            .relative_path
            .ok_or(DomainError::MissingRequiredField { field: "relative_path" })?;
        let absolute_path = self
            .absolute_path
            .ok_or(DomainError::MissingRequiredField { field: "absolute_path" })?;

        Ok(UnitDescriptor {
            kind: self.kind,
            title: self.title.unwrap_or_default(),
            file_name: self
                .file_name
                .unwrap_or_else(|| format!("{class_name}.php")),
            class_name,
            namespace,
            relative_path,
            absolute_path,
            owner: self.owner,
            content: self.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> UnitDescriptorBuilder {
        UnitDescriptor::builder(UnitKind::Job)
            .title("Create Invoice")
            .class_name("CreateInvoiceJob")
            .namespace("App\\Domains\\Billing\\Jobs")
            .paths(
                "app/Domains/Billing/Jobs/CreateInvoiceJob.php",
                "/project/app/Domains/Billing/Jobs/CreateInvoiceJob.php",
            )
    }

    #[test]
    fn builds_with_defaults() {
        let descriptor = job().build().unwrap();
        assert_eq!(descriptor.file_name(), "CreateInvoiceJob.php");
        assert_eq!(
            descriptor.qualified_name(),
            "App\\Domains\\Billing\\Jobs\\CreateInvoiceJob"
        );
        assert!(descriptor.owner().is_none());
        assert!(descriptor.content().is_none());
    }

    #[test]
    fn missing_namespace_is_rejected() {
        let err = UnitDescriptor::builder(UnitKind::Job)
            .class_name("CreateInvoiceJob")
            .paths("a", "/a")
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "namespace" });
    }

    #[test]
    fn owner_accessors() {
        let domain = Domain::new(
            "Billing",
            "App\\Domains\\Billing",
            "app/Domains/Billing",
            "/project/app/Domains/Billing",
        );
        let descriptor = job().owner(Owner::Domain(domain)).build().unwrap();
        assert_eq!(descriptor.domain().map(Domain::name), Some("Billing"));
        assert!(descriptor.service().is_none());
    }

    #[test]
    fn serialises_kind_in_lowercase() {
        let json = serde_json::to_value(job().build().unwrap()).unwrap();
        assert_eq!(json["kind"], "job");
        assert_eq!(json["class_name"], "CreateInvoiceJob");
        assert!(json.get("content").is_none());
    }
}
