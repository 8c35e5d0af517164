//! Project layout: where every unit kind lives on disk and which PHP
//! namespace it declares.
//!
//! Everything here is pure path and string arithmetic. The only inputs are
//! the project base path, the source directory name (normally `app`), the
//! root namespace read from the project manifest and the install mode.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::{Domain, Service};
use crate::domain::naming;

/// Namespace of the runtime base classes every generated unit extends.
pub const UNIT_NAMESPACE: &str = "Lego\\Units";

const SERVICES_DIR: &str = "Services";
const DOMAINS_DIR: &str = "Domains";
const FEATURES_DIR: &str = "Features";
const OPERATIONS_DIR: &str = "Operations";
const JOBS_DIR: &str = "Jobs";
const REQUESTS_DIR: &str = "Requests";
const CONTROLLERS_DIR: &str = "Http/Controllers";
const MODELS_DIR: &str = "Data/Models";
const POLICIES_DIR: &str = "Policies";
const TESTS_DIR: &str = "tests";
const MIGRATIONS_DIR: &str = "database/migrations";

/// How the project is organised.
///
/// A monolith hosts several services under `<src>/Services`. A microservice
/// is a single service whose features and operations sit directly under the
/// source root; service arguments are meaningless there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    Monolith,
    Microservice,
}

impl std::fmt::Display for InstallMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monolith => f.write_str("monolith"),
            Self::Microservice => f.write_str("microservice"),
        }
    }
}

/// Resolved project geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base_path: PathBuf,
    source_dir: String,
    root_namespace: String,
    mode: InstallMode,
}

impl Layout {
    pub fn new(
        base_path: impl Into<PathBuf>,
        source_dir: impl Into<String>,
        root_namespace: impl Into<String>,
        mode: InstallMode,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            source_dir: source_dir.into(),
            root_namespace: root_namespace.into().trim_matches('\\').to_string(),
            mode,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn source_dir(&self) -> &str {
        &self.source_dir
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    pub fn mode(&self) -> InstallMode {
        self.mode
    }

    pub fn is_microservice(&self) -> bool {
        self.mode == InstallMode::Microservice
    }

    /// The same project seen as a monolith, for laying out a new service.
    pub fn as_monolith(&self) -> Self {
        Self {
            mode: InstallMode::Monolith,
            ..self.clone()
        }
    }

    /// The service actually used for path computation: `None` in
    /// microservice mode or when no service was given.
    pub fn scope<'a>(&self, service: Option<&'a str>) -> Option<&'a str> {
        match self.mode {
            InstallMode::Microservice => None,
            InstallMode::Monolith => service.filter(|s| !s.is_empty()),
        }
    }

    // ── Roots ────────────────────────────────────────────────────────────────

    pub fn source_root(&self) -> PathBuf {
        self.base_path.join(&self.source_dir)
    }

    pub fn services_root(&self) -> PathBuf {
        self.source_root().join(SERVICES_DIR)
    }

    pub fn domains_root(&self) -> PathBuf {
        self.source_root().join(DOMAINS_DIR)
    }

    pub fn tests_root(&self) -> PathBuf {
        self.base_path.join(TESTS_DIR)
    }

    // ── Services ─────────────────────────────────────────────────────────────

    pub fn service_path(&self, service: Option<&str>) -> PathBuf {
        match self.scope(service) {
            Some(name) => self.services_root().join(name),
            None => self.source_root(),
        }
    }

    pub fn service_namespace(&self, service: Option<&str>) -> String {
        match self.scope(service) {
            Some(name) => format!("{}\\{SERVICES_DIR}\\{name}", self.root_namespace),
            None => self.root_namespace.clone(),
        }
    }

    /// Build the [`Service`] entity for a directory name under the services root.
    pub fn service(&self, name: &str) -> Service {
        let path = self.services_root().join(name);
        Service::new(
            name,
            naming::snake(name),
            self.relative_from_real(&path),
            path,
        )
    }

    // ── Features ─────────────────────────────────────────────────────────────

    pub fn features_root(&self, service: Option<&str>) -> PathBuf {
        self.service_path(service).join(FEATURES_DIR)
    }

    /// `feature` may contain `/`-separated sub-directories.
    pub fn feature_path(&self, service: Option<&str>, feature: &str) -> PathBuf {
        php_file(self.features_root(service), feature)
    }

    pub fn feature_namespace(&self, service: Option<&str>, feature: &str) -> String {
        let base = format!("{}\\{FEATURES_DIR}", self.service_namespace(service));
        with_sub_namespace(base, feature)
    }

    pub fn feature_test_path(&self, service: Option<&str>, feature: &str) -> PathBuf {
        php_file(
            self.scoped_tests_root("Feature", service),
            &format!("{feature}Test"),
        )
    }

    pub fn feature_test_namespace(&self, service: Option<&str>, feature: &str) -> String {
        with_sub_namespace(self.scoped_tests_namespace("Feature", service), feature)
    }

    // ── Operations ───────────────────────────────────────────────────────────

    pub fn operations_root(&self, service: Option<&str>) -> PathBuf {
        self.service_path(service).join(OPERATIONS_DIR)
    }

    pub fn operation_path(&self, service: Option<&str>, operation: &str) -> PathBuf {
        php_file(self.operations_root(service), operation)
    }

    pub fn operation_namespace(&self, service: Option<&str>) -> String {
        format!("{}\\{OPERATIONS_DIR}", self.service_namespace(service))
    }

    pub fn operation_test_path(&self, service: Option<&str>, operation: &str) -> PathBuf {
        php_file(
            self.scoped_tests_root("Unit", service).join(OPERATIONS_DIR),
            &format!("{operation}Test"),
        )
    }

    pub fn operation_test_namespace(&self, service: Option<&str>) -> String {
        format!(
            "{}\\{OPERATIONS_DIR}",
            self.scoped_tests_namespace("Unit", service)
        )
    }

    // ── Controllers ──────────────────────────────────────────────────────────

    pub fn controllers_root(&self, service: Option<&str>) -> PathBuf {
        self.service_path(service).join(CONTROLLERS_DIR)
    }

    pub fn controller_path(&self, service: Option<&str>, controller: &str) -> PathBuf {
        php_file(self.controllers_root(service), controller)
    }

    pub fn controller_namespace(&self, service: Option<&str>) -> String {
        format!("{}\\Http\\Controllers", self.service_namespace(service))
    }

    // ── Domains and jobs ─────────────────────────────────────────────────────

    pub fn domain_path(&self, domain: &str) -> PathBuf {
        self.domains_root().join(domain)
    }

    pub fn domain_namespace(&self, domain: &str) -> String {
        format!("{}\\{DOMAINS_DIR}\\{domain}", self.root_namespace)
    }

    /// Build the [`Domain`] entity for a directory name under the domains root.
    pub fn domain(&self, name: &str) -> Domain {
        let path = self.domain_path(name);
        Domain::new(
            name,
            self.domain_namespace(name),
            self.relative_from_real(&path),
            path,
        )
    }

    pub fn jobs_root(&self, domain: &str) -> PathBuf {
        self.domain_path(domain).join(JOBS_DIR)
    }

    pub fn job_path(&self, domain: &str, job: &str) -> PathBuf {
        php_file(self.jobs_root(domain), job)
    }

    pub fn job_namespace(&self, domain: &str) -> String {
        format!("{}\\{JOBS_DIR}", self.domain_namespace(domain))
    }

    pub fn domain_tests_path(&self, domain: &str) -> PathBuf {
        self.tests_root().join("Unit").join(DOMAINS_DIR).join(domain)
    }

    pub fn job_test_path(&self, domain: &str, job: &str) -> PathBuf {
        php_file(
            self.domain_tests_path(domain).join(JOBS_DIR),
            &format!("{job}Test"),
        )
    }

    pub fn job_test_namespace(&self, domain: &str) -> String {
        format!("Tests\\Unit\\{DOMAINS_DIR}\\{domain}\\{JOBS_DIR}")
    }

    // ── Requests, models, policies ───────────────────────────────────────────

    pub fn requests_root(&self, domain: &str) -> PathBuf {
        self.domain_path(domain).join(REQUESTS_DIR)
    }

    pub fn request_path(&self, domain: &str, request: &str) -> PathBuf {
        php_file(self.requests_root(domain), request)
    }

    pub fn request_namespace(&self, domain: &str) -> String {
        format!("{}\\{REQUESTS_DIR}", self.domain_namespace(domain))
    }

    pub fn models_root(&self) -> PathBuf {
        self.source_root().join(MODELS_DIR)
    }

    pub fn model_path(&self, model: &str) -> PathBuf {
        php_file(self.models_root(), model)
    }

    pub fn model_namespace(&self) -> String {
        format!("{}\\Data\\Models", self.root_namespace)
    }

    pub fn policies_root(&self) -> PathBuf {
        self.source_root().join(POLICIES_DIR)
    }

    pub fn policy_path(&self, policy: &str) -> PathBuf {
        php_file(self.policies_root(), policy)
    }

    pub fn policy_namespace(&self) -> String {
        format!("{}\\{POLICIES_DIR}", self.root_namespace)
    }

    // ── Misc ─────────────────────────────────────────────────────────────────

    /// Migration directory relative to the project base, as handed to the
    /// migration command's `--path` option.
    pub fn migration_path(&self, service: Option<&str>) -> PathBuf {
        match self.scope(service) {
            Some(name) => self
                .relative_from_real(&self.services_root().join(name))
                .join(MIGRATIONS_DIR),
            None => PathBuf::from(MIGRATIONS_DIR),
        }
    }

    /// Strip the project base from an absolute path.
    ///
    /// Paths outside the project are returned unchanged.
    pub fn relative_from_real(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.base_path)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn scoped_tests_root(&self, suite: &str, service: Option<&str>) -> PathBuf {
        let root = self.tests_root().join(suite);
        match self.scope(service) {
            Some(name) => root.join(SERVICES_DIR).join(name),
            None => root,
        }
    }

    fn scoped_tests_namespace(&self, suite: &str, service: Option<&str>) -> String {
        match self.scope(service) {
            Some(name) => format!("Tests\\{suite}\\{SERVICES_DIR}\\{name}"),
            None => format!("Tests\\{suite}"),
        }
    }
}

/// Find the namespace prefix whose PSR-4 directory is `<source_dir>/`.
///
/// `entries` are `(namespace, directory)` pairs as they appear in the
/// manifest; a trailing separator on either side is ignored.
pub fn match_psr4<'a, I>(entries: I, source_dir: &str) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let wanted = source_dir.trim_end_matches('/');
    entries
        .into_iter()
        .find(|(_, dir)| dir.trim_end_matches('/') == wanted)
        .map(|(namespace, _)| namespace.trim_end_matches('\\').to_string())
}

/// Append `name` (possibly `A/B/Name`) plus `.php` to `root`.
fn php_file(root: PathBuf, name: &str) -> PathBuf {
    let mut path = root;
    for segment in name.split('/') {
        path.push(segment);
    }
    path.set_extension("php");
    path
}

/// Extend a namespace with the sub-directories of a `/`-separated name.
fn with_sub_namespace(base: String, name: &str) -> String {
    match name.rsplit_once('/') {
        Some((dirs, _)) => format!("{base}\\{}", dirs.replace('/', "\\")),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monolith() -> Layout {
        Layout::new("/project", "app", "App", InstallMode::Monolith)
    }

    fn micro() -> Layout {
        Layout::new("/project", "app", "App", InstallMode::Microservice)
    }

    #[test]
    fn feature_in_monolith_service() {
        let layout = monolith();
        assert_eq!(
            layout.feature_path(Some("Api"), "CreateInvoiceFeature"),
            PathBuf::from("/project/app/Services/Api/Features/CreateInvoiceFeature.php")
        );
        assert_eq!(
            layout.feature_namespace(Some("Api"), "CreateInvoiceFeature"),
            "App\\Services\\Api\\Features"
        );
    }

    #[test]
    fn feature_sub_directories_extend_path_and_namespace() {
        let layout = monolith();
        assert_eq!(
            layout.feature_path(Some("Api"), "Billing/CreateInvoiceFeature"),
            PathBuf::from("/project/app/Services/Api/Features/Billing/CreateInvoiceFeature.php")
        );
        assert_eq!(
            layout.feature_namespace(Some("Api"), "Billing/CreateInvoiceFeature"),
            "App\\Services\\Api\\Features\\Billing"
        );
        assert_eq!(
            layout.feature_test_path(Some("Api"), "Billing/CreateInvoiceFeature"),
            PathBuf::from(
                "/project/tests/Feature/Services/Api/Billing/CreateInvoiceFeatureTest.php"
            )
        );
        assert_eq!(
            layout.feature_test_namespace(Some("Api"), "Billing/CreateInvoiceFeature"),
            "Tests\\Feature\\Services\\Api\\Billing"
        );
    }

    #[test]
    fn microservice_ignores_service_argument() {
        let layout = micro();
        assert_eq!(
            layout.feature_path(Some("Api"), "CreateInvoiceFeature"),
            PathBuf::from("/project/app/Features/CreateInvoiceFeature.php")
        );
        assert_eq!(layout.service_namespace(Some("Api")), "App");
        assert_eq!(
            layout.operation_test_namespace(Some("Api")),
            "Tests\\Unit\\Operations"
        );
    }

    #[test]
    fn as_monolith_restores_service_segment() {
        let layout = micro().as_monolith();
        assert_eq!(
            layout.service_path(Some("Api")),
            PathBuf::from("/project/app/Services/Api")
        );
        assert_eq!(layout.service_namespace(Some("Api")), "App\\Services\\Api");
    }

    #[test]
    fn monolith_without_service_uses_source_root() {
        let layout = monolith();
        assert_eq!(layout.service_path(None), PathBuf::from("/project/app"));
        assert_eq!(layout.service_path(Some("")), PathBuf::from("/project/app"));
    }

    #[test]
    fn operations_and_their_tests() {
        let layout = monolith();
        assert_eq!(
            layout.operation_path(Some("Api"), "ChargeCardOperation"),
            PathBuf::from("/project/app/Services/Api/Operations/ChargeCardOperation.php")
        );
        assert_eq!(
            layout.operation_test_path(Some("Api"), "ChargeCardOperation"),
            PathBuf::from(
                "/project/tests/Unit/Services/Api/Operations/ChargeCardOperationTest.php"
            )
        );
        assert_eq!(
            layout.operation_test_namespace(Some("Api")),
            "Tests\\Unit\\Services\\Api\\Operations"
        );
    }

    #[test]
    fn jobs_live_in_domains() {
        let layout = monolith();
        assert_eq!(
            layout.job_path("Billing", "CreateInvoiceJob"),
            PathBuf::from("/project/app/Domains/Billing/Jobs/CreateInvoiceJob.php")
        );
        assert_eq!(layout.job_namespace("Billing"), "App\\Domains\\Billing\\Jobs");
        assert_eq!(
            layout.job_test_path("Billing", "CreateInvoiceJob"),
            PathBuf::from("/project/tests/Unit/Domains/Billing/Jobs/CreateInvoiceJobTest.php")
        );
        assert_eq!(
            layout.job_test_namespace("Billing"),
            "Tests\\Unit\\Domains\\Billing\\Jobs"
        );
    }

    #[test]
    fn models_policies_requests_controllers() {
        let layout = monolith();
        assert_eq!(
            layout.model_path("Post"),
            PathBuf::from("/project/app/Data/Models/Post.php")
        );
        assert_eq!(layout.model_namespace(), "App\\Data\\Models");
        assert_eq!(layout.policy_namespace(), "App\\Policies");
        assert_eq!(
            layout.request_namespace("Billing"),
            "App\\Domains\\Billing\\Requests"
        );
        assert_eq!(
            layout.controller_path(Some("Api"), "InvoiceController"),
            PathBuf::from("/project/app/Services/Api/Http/Controllers/InvoiceController.php")
        );
        assert_eq!(
            layout.controller_namespace(Some("Api")),
            "App\\Services\\Api\\Http\\Controllers"
        );
    }

    #[test]
    fn migration_paths_are_relative() {
        assert_eq!(
            monolith().migration_path(Some("Api")),
            PathBuf::from("app/Services/Api/database/migrations")
        );
        assert_eq!(
            monolith().migration_path(None),
            PathBuf::from("database/migrations")
        );
        assert_eq!(
            micro().migration_path(Some("Api")),
            PathBuf::from("database/migrations")
        );
    }

    #[test]
    fn relative_from_real_strips_base() {
        let layout = monolith();
        assert_eq!(
            layout.relative_from_real(Path::new("/project/app/Domains/Billing")),
            PathBuf::from("app/Domains/Billing")
        );
        assert_eq!(
            layout.relative_from_real(Path::new("/elsewhere/file.php")),
            PathBuf::from("/elsewhere/file.php")
        );
    }

    #[test]
    fn service_entity_has_slug() {
        let service = monolith().service("WebApi");
        assert_eq!(service.name(), "WebApi");
        assert_eq!(service.slug(), "web_api");
        assert_eq!(service.relative_path(), Path::new("app/Services/WebApi"));
    }

    #[test]
    fn psr4_matching() {
        let entries = [("Database\\Seeders\\", "database/seeders/"), ("Acme\\", "app/")];
        assert_eq!(match_psr4(entries, "app"), Some("Acme".to_string()));
        assert_eq!(match_psr4(entries, "src"), None);
    }

    #[test]
    fn root_namespace_is_trimmed() {
        let layout = Layout::new("/p", "app", "Acme\\", InstallMode::Monolith);
        assert_eq!(layout.root_namespace(), "Acme");
        assert_eq!(layout.domain_namespace("Billing"), "Acme\\Domains\\Billing");
    }
}
