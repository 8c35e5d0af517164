//! Unit Generator - creates unit files from stubs.
//!
//! Every generation follows the same steps:
//! 1. Normalise the name(s)
//! 2. Resolve the target path and namespace through the [`Layout`]
//! 3. Refuse with `AlreadyExists` before anything is written
//! 4. Render the stub (and the companion test stub, if any)
//! 5. Write, creating parent directories
//!
//! There is no rollback: if the test file cannot be written the unit file
//! stays in place and the error is returned.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FileStore, StubStore, TemplateRenderer},
        services::project::{Project, relative_name},
    },
    domain::{
        Bindings, ControllerStyle, JobRef, Layout, Owner, Service, StubId, UNIT_NAMESPACE,
        UnitDescriptor, UnitDescriptorBuilder, UnitKind, composition::render_invocations, naming,
    },
    error::StrataResult,
};

/// Framework major version assumed when none is configured.
pub const DEFAULT_FRAMEWORK_VERSION: u32 = 10;

/// Directories created inside a new service, each with a `.gitkeep`.
const SERVICE_DIRECTORIES: [&str; 18] = [
    "Console",
    "database",
    "database/factories",
    "database/migrations",
    "database/seeders",
    "Http",
    "Http/Controllers",
    "Http/Middleware",
    "Providers",
    "Features",
    "Operations",
    "resources",
    "resources/lang",
    "resources/views",
    "routes",
    "Tests",
    "Tests/Features",
    "Tests/Operations",
];

/// Filled by the route files, so it gets no `.gitkeep`.
const ROUTES_DIR: &str = "routes";

const GITKEEP: &str = ".gitkeep";

/// Generates unit files for a [`Project`].
pub struct UnitGenerator<'a> {
    project: &'a Project,
    stubs: &'a dyn StubStore,
    renderer: &'a dyn TemplateRenderer,
    framework_version: u32,
}

impl<'a> UnitGenerator<'a> {
    pub fn new(
        project: &'a Project,
        stubs: &'a dyn StubStore,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            project,
            stubs,
            renderer,
            framework_version: DEFAULT_FRAMEWORK_VERSION,
        }
    }

    /// Select version dependent stubs (`model-8`, `serviceprovider-8`).
    pub fn with_framework_version(mut self, version: u32) -> Self {
        self.framework_version = version;
        self
    }

    // ── Jobs ─────────────────────────────────────────────────────────────────

    #[instrument(skip(self))]
    pub fn generate_job(
        &self,
        name: &str,
        domain: &str,
        queueable: bool,
    ) -> StrataResult<UnitDescriptor> {
        let job = naming::job(name)?;
        let domain = naming::domain(domain)?;
        let layout = self.layout();

        let path = layout.job_path(&domain, &job);
        self.ensure_absent(UnitKind::Job, &path)?;

        let namespace = layout.job_namespace(&domain);
        let stub = if queueable {
            StubId::JobQueueable
        } else {
            StubId::Job
        };
        let content = self.render(
            stub,
            &Bindings::new()
                .with("job", &job)
                .with("namespace", &namespace)
                .with("unit_namespace", UNIT_NAMESPACE),
        )?;
        let test = self.render(
            StubId::JobTest,
            &Bindings::new()
                .with("namespace", layout.job_test_namespace(&domain))
                .with("testclass", format!("{job}Test"))
                .with("job", naming::snake(&job))
                .with("job_namespace", format!("{namespace}\\{job}")),
        )?;

        self.files().create_dir_all(&layout.domain_tests_path(&domain))?;
        self.write(&path, &content)?;
        self.write(&layout.job_test_path(&domain, &job), &test)?;

        info!(%job, %domain, queueable, "Job created");
        Ok(self
            .unit(UnitKind::Job, &job, namespace, &path)
            .owner(Owner::Domain(layout.domain(&domain)))
            .content(content)
            .build()?)
    }

    // ── Features ─────────────────────────────────────────────────────────────

    /// `name` may contain `/`-separated sub-directories.
    #[instrument(skip(self, jobs), fields(jobs = jobs.len()))]
    pub fn generate_feature(
        &self,
        name: &str,
        service: Option<&str>,
        jobs: &[JobRef],
    ) -> StrataResult<UnitDescriptor> {
        let feature = naming::feature(name)?;
        let service = self.service_scope(service)?;
        let service = service.as_deref();
        let layout = self.layout();

        let path = layout.feature_path(service, &feature);
        self.ensure_absent(UnitKind::Feature, &path)?;

        let class_name = feature.rsplit('/').next().unwrap_or(&feature).to_string();
        let namespace = layout.feature_namespace(service, &feature);
        let invocations = render_invocations(jobs);

        let content = self.render(
            StubId::Feature,
            &Bindings::new()
                .with("feature", &class_name)
                .with("namespace", &namespace)
                .with("unit_namespace", UNIT_NAMESPACE)
                .with("use_jobs", invocations.imports)
                .with("run_jobs", invocations.runs),
        )?;
        let test = self.render(
            StubId::FeatureTest,
            &Bindings::new()
                .with("namespace", layout.feature_test_namespace(service, &feature))
                .with("testclass", format!("{class_name}Test"))
                .with("feature", naming::snake(&feature.replace('/', "")))
                .with("feature_namespace", format!("{namespace}\\{class_name}")),
        )?;

        self.write(&path, &content)?;
        self.write(&layout.feature_test_path(service, &feature), &test)?;

        info!(%feature, service = service.unwrap_or("-"), "Feature created");
        Ok(self
            .unit(UnitKind::Feature, &class_name, namespace, &path)
            .file_name(format!("{feature}.php"))
            .maybe_owner(service.map(|s| Owner::Service(layout.service(s))))
            .content(content)
            .build()?)
    }

    // ── Operations ───────────────────────────────────────────────────────────

    #[instrument(skip(self, jobs), fields(jobs = jobs.len()))]
    pub fn generate_operation(
        &self,
        name: &str,
        service: Option<&str>,
        queueable: bool,
        jobs: &[JobRef],
    ) -> StrataResult<UnitDescriptor> {
        let operation = naming::operation(name)?;
        let service = self.service_scope(service)?;
        let service = service.as_deref();
        let layout = self.layout();

        let path = layout.operation_path(service, &operation);
        self.ensure_absent(UnitKind::Operation, &path)?;

        let namespace = layout.operation_namespace(service);
        let invocations = render_invocations(jobs);
        let stub = if queueable {
            StubId::OperationQueueable
        } else {
            StubId::Operation
        };

        let content = self.render(
            stub,
            &Bindings::new()
                .with("operation", &operation)
                .with("namespace", &namespace)
                .with("unit_namespace", UNIT_NAMESPACE)
                .with("use_jobs", invocations.imports)
                .with("run_jobs", invocations.runs),
        )?;
        let test = self.render(
            StubId::OperationTest,
            &Bindings::new()
                .with("namespace", layout.operation_test_namespace(service))
                .with("testclass", format!("{operation}Test"))
                .with("operation", naming::snake(&operation))
                .with("operation_namespace", format!("{namespace}\\{operation}")),
        )?;

        self.write(&path, &content)?;
        self.write(&layout.operation_test_path(service, &operation), &test)?;

        info!(%operation, service = service.unwrap_or("-"), queueable, "Operation created");
        Ok(self
            .unit(UnitKind::Operation, &operation, namespace, &path)
            .maybe_owner(service.map(|s| Owner::Service(layout.service(s))))
            .content(content)
            .build()?)
    }

    // ── Models, policies, requests, controllers ──────────────────────────────

    #[instrument(skip(self))]
    pub fn generate_model(&self, name: &str) -> StrataResult<UnitDescriptor> {
        let model = naming::model(name)?;
        let layout = self.layout();

        let path = layout.model_path(&model);
        self.ensure_absent(UnitKind::Model, &path)?;

        let namespace = layout.model_namespace();
        let content = self.render(
            StubId::model_for(self.framework_version),
            &Bindings::new()
                .with("model", &model)
                .with("namespace", &namespace)
                .with("unit_namespace", UNIT_NAMESPACE),
        )?;
        self.write(&path, &content)?;

        info!(%model, "Model created");
        Ok(self
            .unit(UnitKind::Model, &model, namespace, &path)
            .content(content)
            .build()?)
    }

    #[instrument(skip(self))]
    pub fn generate_policy(&self, name: &str) -> StrataResult<UnitDescriptor> {
        let policy = naming::policy(name)?;
        let layout = self.layout();

        let path = layout.policy_path(&policy);
        self.ensure_absent(UnitKind::Policy, &path)?;

        let namespace = layout.policy_namespace();
        let content = self.render(
            StubId::Policy,
            &Bindings::new()
                .with("policy", &policy)
                .with("namespace", &namespace),
        )?;
        self.write(&path, &content)?;

        info!(%policy, "Policy created");
        Ok(self
            .unit(UnitKind::Policy, &policy, namespace, &path)
            .content(content)
            .build()?)
    }

    #[instrument(skip(self))]
    pub fn generate_request(&self, name: &str, domain: &str) -> StrataResult<UnitDescriptor> {
        let request = naming::request(name)?;
        let domain = naming::domain(domain)?;
        let layout = self.layout();

        let path = layout.request_path(&domain, &request);
        self.ensure_absent(UnitKind::Request, &path)?;

        let namespace = layout.request_namespace(&domain);
        let content = self.render(
            StubId::Request,
            &Bindings::new()
                .with("request", &request)
                .with("namespace", &namespace),
        )?;
        self.write(&path, &content)?;

        info!(%request, %domain, "Request created");
        Ok(self
            .unit(UnitKind::Request, &request, namespace, &path)
            .owner(Owner::Domain(layout.domain(&domain)))
            .content(content)
            .build()?)
    }

    #[instrument(skip(self))]
    pub fn generate_controller(
        &self,
        name: &str,
        service: Option<&str>,
        style: ControllerStyle,
    ) -> StrataResult<UnitDescriptor> {
        let controller = naming::controller(name)?;
        let service = self.service_scope(service)?;
        let service = service.as_deref();
        let layout = self.layout();

        let path = layout.controller_path(service, &controller);
        self.ensure_absent(UnitKind::Controller, &path)?;

        let namespace = layout.controller_namespace(service);
        let content = self.render(
            style.stub(),
            &Bindings::new()
                .with("controller", &controller)
                .with("namespace", &namespace)
                .with("unit_namespace", UNIT_NAMESPACE),
        )?;
        self.write(&path, &content)?;

        info!(%controller, service = service.unwrap_or("-"), ?style, "Controller created");
        Ok(self
            .unit(UnitKind::Controller, &controller, namespace, &path)
            .maybe_owner(service.map(|s| Owner::Service(layout.service(s))))
            .content(content)
            .build()?)
    }

    // ── Services ─────────────────────────────────────────────────────────────

    /// Scaffold a complete service directory: skeleton directories,
    /// providers, route files and a welcome view.
    #[instrument(skip(self))]
    pub fn generate_service(&self, name: &str) -> StrataResult<Service> {
        let name = naming::service(name)?;
        // a new service always lives under <src>/Services
        let layout = self.layout().as_monolith();

        let path = layout.service_path(Some(&name));
        self.ensure_absent(UnitKind::Service, &path)?;

        let slug = naming::snake(&name);
        let namespace = layout.service_namespace(Some(&name));
        let providers = format!("{namespace}\\Providers");
        let controllers_path = relative_name(
            layout.base_path(),
            &layout.controllers_root(Some(&name)),
        );

        let files = [
            (
                format!("Providers/{name}ServiceProvider.php"),
                StubId::service_provider_for(self.framework_version),
                Bindings::new()
                    .with("name", &name)
                    .with("slug", &slug)
                    .with("namespace", &providers),
            ),
            (
                "Providers/RouteServiceProvider.php".to_string(),
                StubId::RouteServiceProvider,
                Bindings::new()
                    .with("name", &name)
                    .with("namespace", &providers)
                    .with("controllers_namespace", layout.controller_namespace(Some(&name)))
                    .with("unit_namespace", UNIT_NAMESPACE),
            ),
            (
                "Providers/BroadcastServiceProvider.php".to_string(),
                StubId::BroadcastServiceProvider,
                Bindings::new()
                    .with("name", &name)
                    .with("slug", &slug)
                    .with("namespace", &providers),
            ),
            (
                "routes/api.php".to_string(),
                StubId::RoutesApi,
                Bindings::new()
                    .with("slug", &slug)
                    .with("controllers_path", &controllers_path),
            ),
            (
                "routes/web.php".to_string(),
                StubId::RoutesWeb,
                Bindings::new()
                    .with("slug", &slug)
                    .with("controllers_path", &controllers_path),
            ),
            (
                "routes/channels.php".to_string(),
                StubId::RoutesChannels,
                Bindings::new().with("namespace", &namespace),
            ),
            (
                "routes/console.php".to_string(),
                StubId::RoutesConsole,
                Bindings::new(),
            ),
            (
                "resources/views/welcome.blade.php".to_string(),
                StubId::WelcomeView,
                Bindings::new().with("name", &name).with("slug", &slug),
            ),
        ];

        let rendered = files
            .iter()
            .map(|(file, stub, bindings)| Ok((path.join(file), self.render(*stub, bindings)?)))
            .collect::<StrataResult<Vec<_>>>()?;

        self.files().create_dir_all(&path)?;
        self.write(&path.join(GITKEEP), "")?;
        for directory in SERVICE_DIRECTORIES {
            let dir = path.join(directory);
            self.files().create_dir_all(&dir)?;
            if directory != ROUTES_DIR {
                self.write(&dir.join(GITKEEP), "")?;
            }
        }
        for (file, content) in &rendered {
            self.write(file, content)?;
        }

        info!(service = %name, %slug, "Service created");
        Ok(layout.service(&name))
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn layout(&self) -> &Layout {
        self.project.layout()
    }

    fn files(&self) -> &dyn FileStore {
        self.project.files()
    }

    /// Normalised service name for path computation; dropped with a warning
    /// in a microservice.
    fn service_scope(&self, service: Option<&str>) -> StrataResult<Option<String>> {
        match service.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(raw) if self.layout().is_microservice() => {
                warn!(service = raw, "Service argument ignored in a microservice installation");
                Ok(None)
            }
            Some(raw) => Ok(Some(naming::service(raw)?)),
        }
    }

    fn ensure_absent(&self, kind: UnitKind, path: &Path) -> StrataResult<()> {
        if self.files().exists(path) {
            return Err(ApplicationError::AlreadyExists {
                kind,
                path: self.layout().relative_from_real(path),
            }
            .into());
        }
        Ok(())
    }

    fn render(&self, stub: StubId, bindings: &Bindings) -> StrataResult<String> {
        let template = self.stubs.get(stub)?;
        self.renderer.render(&template, bindings)
    }

    fn write(&self, path: &Path, content: &str) -> StrataResult<()> {
        if let Some(parent) = path.parent() {
            self.files().create_dir_all(parent)?;
        }
        self.files().write_file(path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "File written");
        Ok(())
    }

    fn unit(
        &self,
        kind: UnitKind,
        class_name: &str,
        namespace: String,
        path: &Path,
    ) -> UnitDescriptorBuilder {
        UnitDescriptor::builder(kind)
            .title(naming::title(kind, class_name))
            .class_name(class_name)
            .namespace(namespace)
            .paths(self.layout().relative_from_real(path), path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::MockFileStore;
    use crate::application::testing::{FakeFiles, FakeRenderer, FakeStubs, microservice, monolith};
    use crate::domain::InstallMode;

    fn generate<T>(files: &FakeFiles, f: impl FnOnce(&UnitGenerator) -> T) -> T {
        let project = monolith(files);
        let generator = UnitGenerator::new(&project, &FakeStubs, &FakeRenderer);
        f(&generator)
    }

    #[test]
    fn job_and_its_test_are_written() {
        let files = FakeFiles::new().with_dir("/project/app/Services");
        let job = generate(&files, |g| g.generate_job("create invoice", "billing", true)).unwrap();

        assert_eq!(job.class_name(), "CreateInvoiceJob");
        assert_eq!(job.namespace(), "App\\Domains\\Billing\\Jobs");
        assert_eq!(
            job.relative_path(),
            Path::new("app/Domains/Billing/Jobs/CreateInvoiceJob.php")
        );
        assert_eq!(job.domain().map(|d| d.name()), Some("Billing"));

        let written = files
            .content("/project/app/Domains/Billing/Jobs/CreateInvoiceJob.php")
            .unwrap();
        assert!(written.starts_with("stub:job-queueable.stub"));
        assert!(written.contains("unit_namespace=Lego\\Units"));

        let test = files
            .content("/project/tests/Unit/Domains/Billing/Jobs/CreateInvoiceJobTest.php")
            .unwrap();
        assert!(test.contains("testclass=CreateInvoiceJobTest"));
        assert!(test.contains("job=create_invoice_job"));
        assert!(test.contains("job_namespace=App\\Domains\\Billing\\Jobs\\CreateInvoiceJob"));
    }

    #[test]
    fn existing_job_is_refused_without_writes() {
        let mut store = MockFileStore::new();
        store.expect_exists().returning(|_| true);
        store.expect_write_file().never();
        store.expect_create_dir_all().never();

        let project = Project::new(
            Layout::new("/project", "app", "App", InstallMode::Monolith),
            Box::new(store),
        );
        let generator = UnitGenerator::new(&project, &FakeStubs, &FakeRenderer);

        let err = generator
            .generate_job("CreateInvoice", "Billing", false)
            .unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(
            err.to_string(),
            "Job already exists at app/Domains/Billing/Jobs/CreateInvoiceJob.php"
        );
    }

    #[test]
    fn feature_with_sub_directory_and_jobs() {
        let files = FakeFiles::new().with_dir("/project/app/Services/Api");
        let jobs = [JobRef::parse_qualified("App\\Domains\\Billing\\Jobs\\CreateInvoiceJob").unwrap()];
        let feature = generate(&files, |g| {
            g.generate_feature("billing/create-invoice", Some("api"), &jobs)
        })
        .unwrap();

        assert_eq!(feature.class_name(), "CreateInvoiceFeature");
        assert_eq!(feature.file_name(), "Billing/CreateInvoiceFeature.php");
        assert_eq!(
            feature.namespace(),
            "App\\Services\\Api\\Features\\Billing"
        );
        assert_eq!(feature.service().map(|s| s.slug()), Some("api"));

        let content = feature.content().unwrap();
        assert!(content.contains("use_jobs=use App\\Domains\\Billing\\Jobs\\CreateInvoiceJob;"));
        assert!(content.contains("run_jobs=\t\t$this->run(CreateInvoiceJob::class);"));

        let test = files
            .content("/project/tests/Feature/Services/Api/Billing/CreateInvoiceFeatureTest.php")
            .unwrap();
        assert!(test.contains("feature=billing_create_invoice_feature"));
    }

    #[test]
    fn microservice_feature_drops_service() {
        let files = FakeFiles::new();
        let project = microservice(&files);
        let generator = UnitGenerator::new(&project, &FakeStubs, &FakeRenderer);

        let feature = generator
            .generate_feature("ListUsers", Some("Api"), &[])
            .unwrap();

        assert_eq!(
            feature.absolute_path(),
            Path::new("/project/app/Features/ListUsersFeature.php")
        );
        assert!(feature.service().is_none());
    }

    #[test]
    fn operation_uses_queueable_stub() {
        let files = FakeFiles::new();
        let op = generate(&files, |g| g.generate_operation("charge card", Some("Api"), true, &[]))
            .unwrap();

        assert_eq!(op.namespace(), "App\\Services\\Api\\Operations");
        assert!(op.content().unwrap().starts_with("stub:operation-queueable.stub"));
        assert!(
            files
                .content("/project/tests/Unit/Services/Api/Operations/ChargeCardOperationTest.php")
                .is_some()
        );
    }

    #[test]
    fn model_stub_follows_framework_version() {
        let files = FakeFiles::new();
        let project = monolith(&files);

        let old = UnitGenerator::new(&project, &FakeStubs, &FakeRenderer)
            .with_framework_version(7)
            .generate_model("post")
            .unwrap();
        let new = UnitGenerator::new(&project, &FakeStubs, &FakeRenderer)
            .generate_model("comment")
            .unwrap();

        assert!(old.content().unwrap().starts_with("stub:model.stub"));
        assert!(new.content().unwrap().starts_with("stub:model-8.stub"));
        assert_eq!(new.relative_path(), Path::new("app/Data/Models/Comment.php"));
    }

    #[test]
    fn policy_request_and_controller() {
        let files = FakeFiles::new();
        let policy = generate(&files, |g| g.generate_policy("post")).unwrap();
        let request = generate(&files, |g| g.generate_request("store invoice", "billing")).unwrap();
        let controller = generate(&files, |g| {
            g.generate_controller("invoice", Some("Api"), ControllerStyle::Plain)
        })
        .unwrap();

        assert_eq!(policy.class_name(), "PostPolicy");
        assert_eq!(policy.namespace(), "App\\Policies");
        assert_eq!(request.namespace(), "App\\Domains\\Billing\\Requests");
        assert_eq!(controller.class_name(), "InvoiceController");
        assert!(
            controller
                .content()
                .unwrap()
                .starts_with("stub:controller.plain.stub")
        );
    }

    #[test]
    fn service_scaffold() {
        let files = FakeFiles::new();
        let service = generate(&files, |g| g.generate_service("web api")).unwrap();

        assert_eq!(service.name(), "WebApi");
        assert_eq!(service.slug(), "web_api");

        let root = PathBuf::from("/project/app/Services/WebApi");
        for dir in SERVICE_DIRECTORIES {
            assert!(files.is_dir(&root.join(dir)), "{dir} missing");
        }
        assert!(files.exists(&root.join("Http/Middleware/.gitkeep")));
        assert!(!files.exists(&root.join("routes/.gitkeep")));

        let provider = files
            .content("/project/app/Services/WebApi/Providers/WebApiServiceProvider.php")
            .unwrap();
        assert!(provider.starts_with("stub:serviceprovider-8.stub"));
        assert!(provider.contains("namespace=App\\Services\\WebApi\\Providers"));

        let api = files
            .content("/project/app/Services/WebApi/routes/api.php")
            .unwrap();
        assert!(api.contains("controllers_path=app/Services/WebApi/Http/Controllers"));
    }

    #[test]
    fn duplicate_service_is_refused() {
        let files = FakeFiles::new().with_dir("/project/app/Services/Api");
        let err = generate(&files, |g| g.generate_service("api")).unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn invalid_name_writes_nothing() {
        let files = FakeFiles::new();
        let err = generate(&files, |g| g.generate_job("Job", "Billing", false)).unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::Validation);
        assert_eq!(files.file_count(), 0);
    }
}
