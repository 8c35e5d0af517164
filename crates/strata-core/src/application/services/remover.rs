//! Unit Remover - deletes unit files and whole services.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, services::project::Project},
    domain::{Layout, UnitKind, naming},
    error::StrataResult,
};

/// What a delete operation removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub kind: UnitKind,
    pub name: String,
    /// Project-relative path of the removed file or directory.
    pub path: PathBuf,
    /// Directory removed along with the unit because it became empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascaded: Option<PathBuf>,
}

/// Deletes units from a [`Project`].
pub struct UnitRemover<'a> {
    project: &'a Project,
}

impl<'a> UnitRemover<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Delete a job; the domain directory goes too once it holds no file.
    #[instrument(skip(self))]
    pub fn delete_job(&self, name: &str, domain: &str) -> StrataResult<Removal> {
        let job = naming::job(name)?;
        let domain = naming::domain(domain)?;
        let layout = self.layout();

        let mut removal = self.remove_unit(UnitKind::Job, &job, &layout.job_path(&domain, &job))?;

        // requests and anything else in the domain keep it alive
        let domain_path = layout.domain_path(&domain);
        let remaining = self.project.files().walk_files(&domain_path)?.len();

        if remaining == 0 {
            self.project.files().remove(&domain_path)?;
            info!(%domain, "Domain removed with its last job");
            removal.cascaded = Some(layout.relative_from_real(&domain_path));
        }

        Ok(removal)
    }

    #[instrument(skip(self))]
    pub fn delete_feature(&self, name: &str, service: Option<&str>) -> StrataResult<Removal> {
        let feature = naming::feature(name)?;
        let service = self.service_name(service)?;
        let path = self.layout().feature_path(service.as_deref(), &feature);
        self.remove_unit(UnitKind::Feature, &feature, &path)
    }

    #[instrument(skip(self))]
    pub fn delete_operation(&self, name: &str, service: Option<&str>) -> StrataResult<Removal> {
        let operation = naming::operation(name)?;
        let service = self.service_name(service)?;
        let path = self.layout().operation_path(service.as_deref(), &operation);
        self.remove_unit(UnitKind::Operation, &operation, &path)
    }

    #[instrument(skip(self))]
    pub fn delete_model(&self, name: &str) -> StrataResult<Removal> {
        let model = naming::model(name)?;
        let path = self.layout().model_path(&model);
        self.remove_unit(UnitKind::Model, &model, &path)
    }

    #[instrument(skip(self))]
    pub fn delete_policy(&self, name: &str) -> StrataResult<Removal> {
        let policy = naming::policy(name)?;
        let path = self.layout().policy_path(&policy);
        self.remove_unit(UnitKind::Policy, &policy, &path)
    }

    #[instrument(skip(self))]
    pub fn delete_request(&self, name: &str, domain: &str) -> StrataResult<Removal> {
        let request = naming::request(name)?;
        let domain = naming::domain(domain)?;
        let path = self.layout().request_path(&domain, &request);
        self.remove_unit(UnitKind::Request, &request, &path)
    }

    /// Delete a whole service directory. Monolith only.
    #[instrument(skip(self))]
    pub fn delete_service(&self, name: &str) -> StrataResult<Removal> {
        if self.layout().is_microservice() {
            return Err(ApplicationError::Unsupported {
                operation: "Deleting a service",
            }
            .into());
        }

        let service = naming::service(name)?;
        let path = self.layout().service_path(Some(&service));
        if !self.project.files().is_dir(&path) {
            return Err(ApplicationError::not_found(UnitKind::Service, name).into());
        }
        self.remove_unit(UnitKind::Service, &service, &path)
    }

    fn layout(&self) -> &Layout {
        self.project.layout()
    }

    fn service_name(&self, service: Option<&str>) -> StrataResult<Option<String>> {
        match service.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) if !self.layout().is_microservice() => Ok(Some(naming::service(raw)?)),
            _ => Ok(None),
        }
    }

    fn remove_unit(&self, kind: UnitKind, name: &str, path: &Path) -> StrataResult<Removal> {
        if !self.project.files().exists(path) {
            return Err(ApplicationError::not_found(kind, name).into());
        }

        self.project.files().remove(path)?;
        let relative = self.layout().relative_from_real(path);
        info!(%kind, %name, path = %relative.display(), "Unit deleted");

        Ok(Removal {
            kind,
            name: name.to_string(),
            path: relative,
            cascaded: None,
        })
    }
}
