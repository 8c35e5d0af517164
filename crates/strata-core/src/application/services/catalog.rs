//! Catalog - read-only discovery of services, domains, features and jobs,
//! plus fuzzy search over feature and job names.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        services::project::{Project, dir_name, relative_name},
    },
    domain::{
        Domain, JobRef, Owner, Service, UnitDescriptor, UnitKind, naming,
        similarity::similarity_percent,
    },
    error::StrataResult,
};

/// Minimum similarity percentage a search candidate must exceed.
pub const SEARCH_THRESHOLD: f64 = 35.0;

/// Ranked fuzzy search results, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub features: Vec<UnitDescriptor>,
    pub jobs: Vec<UnitDescriptor>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.jobs.is_empty()
    }
}

/// Read-only view over a [`Project`].
pub struct Catalog<'a> {
    project: &'a Project,
}

impl<'a> Catalog<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    // ── Services ─────────────────────────────────────────────────────────────

    /// Every service directory, sorted by name. Empty in a microservice.
    #[instrument(skip(self))]
    pub fn list_services(&self) -> StrataResult<Vec<Service>> {
        let layout = self.project.layout();
        if layout.is_microservice() {
            return Ok(Vec::new());
        }

        let dirs = self.project.files().list_dirs(&layout.services_root())?;
        let services: Vec<Service> = dirs
            .iter()
            .filter_map(|path| dir_name(path))
            .map(|name| layout.service(name))
            .collect();

        debug!(count = services.len(), "Services listed");
        Ok(services)
    }

    /// Look a service up by directory name, slug or StudlyCase form.
    pub fn find_service(&self, name: &str) -> StrataResult<Service> {
        let studly = naming::studly(name);
        self.list_services()?
            .into_iter()
            .find(|service| service.answers_to(name) || service.name() == studly)
            .ok_or_else(|| ApplicationError::not_found(UnitKind::Service, name).into())
    }

    // ── Domains ──────────────────────────────────────────────────────────────

    #[instrument(skip(self))]
    pub fn list_domains(&self) -> StrataResult<Vec<Domain>> {
        let layout = self.project.layout();
        let dirs = self.project.files().list_dirs(&layout.domains_root())?;

        Ok(dirs
            .iter()
            .filter_map(|path| dir_name(path))
            .map(|name| layout.domain(name))
            .collect())
    }

    pub fn find_domain(&self, name: &str) -> StrataResult<Domain> {
        let domain = naming::domain(name)?;
        let layout = self.project.layout();

        if self.project.files().is_dir(&layout.domain_path(&domain)) {
            Ok(layout.domain(&domain))
        } else {
            Err(ApplicationError::not_found(UnitKind::Domain, name).into())
        }
    }

    // ── Features ─────────────────────────────────────────────────────────────

    /// Features grouped by service name.
    ///
    /// With a filter only that service is listed; an unknown filter is
    /// `NotFound`. Features outside any service are grouped under the source
    /// directory name. A microservice has only that group and ignores the
    /// filter.
    #[instrument(skip(self))]
    pub fn list_features(
        &self,
        service: Option<&str>,
    ) -> StrataResult<BTreeMap<String, Vec<UnitDescriptor>>> {
        let layout = self.project.layout();
        if layout.is_microservice() {
            if let Some(name) = service {
                warn!(service = name, "Service filter ignored in a microservice installation");
            }
        }

        let roots = match (layout.is_microservice(), service) {
            (false, Some(name)) => {
                let service = self.find_service(name)?;
                vec![(layout.features_root(Some(service.name())), Some(service))]
            }
            _ => self.feature_roots()?,
        };

        let mut groups = BTreeMap::new();
        for (root, service) in roots {
            let group = service
                .as_ref()
                .map_or_else(|| layout.source_dir().to_string(), |s| s.name().to_string());
            let features = self.features_under(&root, service, false)?;
            groups.insert(group, features);
        }
        Ok(groups)
    }

    /// Locate a feature by (normalised) name across all services.
    ///
    /// A name with sub-directories must match them exactly; a bare name
    /// matches at any depth. The first hit in path order wins.
    #[instrument(skip(self))]
    pub fn find_feature(&self, name: &str) -> StrataResult<UnitDescriptor> {
        let normalized = naming::feature(name)?;
        let wanted = format!("{normalized}.php");
        let nested = normalized.contains('/');

        for (root, service) in self.feature_roots()? {
            for path in self.project.files().walk_files(&root)? {
                let relative = relative_name(&root, &path);
                let hit = relative == wanted
                    || (!nested && dir_name(&path) == Some(wanted.as_str()));
                if hit {
                    return self.describe_feature(&root, &path, service, true);
                }
            }
        }

        Err(ApplicationError::not_found(UnitKind::Feature, name).into())
    }

    fn feature_roots(&self) -> StrataResult<Vec<(PathBuf, Option<Service>)>> {
        let layout = self.project.layout();
        if layout.is_microservice() {
            return Ok(vec![(layout.features_root(None), None)]);
        }

        let mut roots: Vec<_> = self
            .list_services()?
            .into_iter()
            .map(|service| (layout.features_root(Some(service.name())), Some(service)))
            .collect();

        // `make:feature` without a service writes to `<src>/Features`
        let ownerless = layout.features_root(None);
        if self.project.files().is_dir(&ownerless) {
            roots.push((ownerless, None));
        }
        Ok(roots)
    }

    fn features_under(
        &self,
        root: &Path,
        service: Option<Service>,
        load_content: bool,
    ) -> StrataResult<Vec<UnitDescriptor>> {
        self.project
            .files()
            .walk_files(root)?
            .iter()
            .filter(|path| has_unit_suffix(path, UnitKind::Feature))
            .map(|path| self.describe_feature(root, path, service.clone(), load_content))
            .collect()
    }

    fn describe_feature(
        &self,
        root: &Path,
        path: &Path,
        service: Option<Service>,
        load_content: bool,
    ) -> StrataResult<UnitDescriptor> {
        let layout = self.project.layout();
        let relative = relative_name(root, path);
        let stem = relative.strip_suffix(".php").unwrap_or(&relative);
        let namespace = layout.feature_namespace(service.as_ref().map(Service::name), stem);

        self.project.describe_file(
            UnitKind::Feature,
            root,
            path,
            namespace,
            service.map(Owner::Service),
            load_content,
        )
    }

    // ── Jobs ─────────────────────────────────────────────────────────────────

    /// Jobs grouped by domain name. An unknown domain filter is `NotFound`.
    #[instrument(skip(self))]
    pub fn list_jobs(
        &self,
        domain: Option<&str>,
    ) -> StrataResult<BTreeMap<String, Vec<UnitDescriptor>>> {
        let domains = match domain {
            Some(name) => vec![self.find_domain(name)?],
            None => self.list_domains()?,
        };

        let mut groups = BTreeMap::new();
        for domain in domains {
            let root = self.project.layout().jobs_root(domain.name());
            let jobs = self
                .project
                .files()
                .walk_files(&root)?
                .iter()
                .filter(|path| has_unit_suffix(path, UnitKind::Job))
                .map(|path| self.describe_job(&root, path, &domain, false))
                .collect::<StrataResult<Vec<_>>>()?;
            groups.insert(domain.name().to_string(), jobs);
        }
        Ok(groups)
    }

    /// Locate a job by (normalised) name across all domains.
    #[instrument(skip(self))]
    pub fn find_job(&self, name: &str) -> StrataResult<UnitDescriptor> {
        let wanted = format!("{}.php", naming::job(name)?);

        for domain in self.list_domains()? {
            let root = self.project.layout().jobs_root(domain.name());
            for path in self.project.files().walk_files(&root)? {
                if dir_name(&path) == Some(wanted.as_str()) {
                    return self.describe_job(&root, &path, &domain, true);
                }
            }
        }

        Err(ApplicationError::not_found(UnitKind::Job, name).into())
    }

    /// Locate the job a `$this->run(...)` call refers to.
    ///
    /// A qualified reference only matches a job whose domain namespace is the
    /// same; an unqualified one falls back to [`Catalog::find_job`].
    #[instrument(skip_all, fields(job = %job))]
    pub fn find_job_ref(&self, job: &JobRef) -> StrataResult<UnitDescriptor> {
        if job.namespace().is_empty() {
            return self.find_job(job.class_name());
        }

        let layout = self.project.layout();
        let wanted = format!("{}.php", job.class_name());
        for domain in self.list_domains()? {
            if layout.job_namespace(domain.name()) != job.namespace() {
                continue;
            }
            let root = layout.jobs_root(domain.name());
            for path in self.project.files().list_files(&root)? {
                if dir_name(&path) == Some(wanted.as_str()) {
                    return self.describe_job(&root, &path, &domain, true);
                }
            }
        }

        Err(ApplicationError::not_found(UnitKind::Job, job.to_string()).into())
    }

    fn describe_job(
        &self,
        root: &Path,
        path: &Path,
        domain: &Domain,
        load_content: bool,
    ) -> StrataResult<UnitDescriptor> {
        let namespace = self.project.layout().job_namespace(domain.name());
        self.project.describe_file(
            UnitKind::Job,
            root,
            path,
            namespace,
            Some(Owner::Domain(domain.clone())),
            load_content,
        )
    }

    // ── Search ───────────────────────────────────────────────────────────────

    /// Fuzzy search over every feature and job file name.
    ///
    /// The candidate is the file name without `.php`, lower-cased; the query
    /// is trimmed with inner spaces removed. Hits scoring above
    /// [`SEARCH_THRESHOLD`] are ranked by score, then by relative path.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> StrataResult<SearchResults> {
        let query: String = query.trim().chars().filter(|c| *c != ' ').collect();

        let features = self.list_features(None)?.into_values().flatten();
        let jobs = self.list_jobs(None)?.into_values().flatten();

        let results = SearchResults {
            features: rank(&query, features),
            jobs: rank(&query, jobs),
        };
        debug!(
            features = results.features.len(),
            jobs = results.jobs.len(),
            "Search finished"
        );
        Ok(results)
    }
}

/// Scores stay internal; callers only see the ordering.
fn rank(query: &str, units: impl Iterator<Item = UnitDescriptor>) -> Vec<UnitDescriptor> {
    let mut scored: Vec<(f64, UnitDescriptor)> = units
        .filter_map(|unit| {
            let candidate = unit.class_name().replace(' ', "").to_lowercase();
            let score = similarity_percent(query, &candidate);
            (score > SEARCH_THRESHOLD).then_some((score, unit))
        })
        .collect();

    scored.sort_by(|(a_score, a), (b_score, b)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.relative_path().cmp(b.relative_path()))
    });
    scored.into_iter().map(|(_, unit)| unit).collect()
}

fn has_unit_suffix(path: &Path, kind: UnitKind) -> bool {
    let suffix = format!("{}.php", kind.suffix().unwrap_or_default());
    dir_name(path).is_some_and(|name| name.ends_with(&suffix))
}
