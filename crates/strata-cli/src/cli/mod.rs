//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Unit scaffolding for layered PHP service projects",
    long_about = "Strata creates, lists and deletes the services, domains, features, \
                  operations and jobs of a Laravel project organised in units.",
    after_help = "EXAMPLES:\n\
        \x20 strata init:monolith Billing\n\
        \x20 strata make:job CreateInvoice Billing --queue\n\
        \x20 strata make:feature IssueInvoice Billing\n\
        \x20 strata list:features\n\
        \x20 strata search create invoice",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    // ── services ──────────────────────────────────────────────────────────
    /// Create a new service.
    #[command(name = "make:service")]
    MakeService(NameArgs),

    /// Delete an existing service.
    #[command(name = "delete:service")]
    DeleteService(DeleteServiceArgs),

    /// List the services of the project.
    #[command(name = "list:services")]
    ListServices,

    // ── features ──────────────────────────────────────────────────────────
    /// Create a new feature in a service.
    #[command(
        name = "make:feature",
        after_help = "EXAMPLES:\n\
            \x20 strata make:feature IssueInvoice Billing\n\
            \x20 strata make:feature Invoices/IssueInvoice Billing \\\n\
            \x20     --job 'App\\Domains\\Billing\\Jobs\\CreateInvoiceJob'"
    )]
    MakeFeature(MakeFeatureArgs),

    /// Delete an existing feature.
    #[command(name = "delete:feature")]
    DeleteFeature(UnitInServiceArgs),

    /// List the jobs a feature runs, in order.
    #[command(name = "describe:feature")]
    DescribeFeature(DescribeFeatureArgs),

    /// List the features of every service, or of one.
    #[command(name = "list:features")]
    ListFeatures(ListFeaturesArgs),

    // ── operations ────────────────────────────────────────────────────────
    /// Create a new operation in a service.
    #[command(
        name = "make:operation",
        after_help = "EXAMPLES:\n\
            \x20 strata make:operation ChargeCard Billing\n\
            \x20 strata make:operation ChargeCard Billing \\\n\
            \x20     'App\\Domains\\Billing\\Jobs\\CreateInvoiceJob' --queue"
    )]
    MakeOperation(MakeOperationArgs),

    /// Delete an existing operation.
    #[command(name = "delete:operation")]
    DeleteOperation(UnitInServiceArgs),

    // ── jobs ──────────────────────────────────────────────────────────────
    /// Create a new job in a domain.
    #[command(name = "make:job")]
    MakeJob(MakeJobArgs),

    /// Delete an existing job; an emptied domain goes with it.
    #[command(name = "delete:job")]
    DeleteJob(UnitInDomainArgs),

    /// List the jobs of every domain, or of one.
    #[command(name = "list:jobs")]
    ListJobs(ListJobsArgs),

    /// List the domains of the project.
    #[command(name = "list:domains")]
    ListDomains,

    // ── data, policies, requests ──────────────────────────────────────────
    /// Create a new Eloquent model.
    #[command(name = "make:model")]
    MakeModel(NameArgs),

    /// Delete an existing model.
    #[command(name = "delete:model")]
    DeleteModel(NameArgs),

    /// Create a new policy.
    #[command(name = "make:policy")]
    MakePolicy(NameArgs),

    /// Delete an existing policy.
    #[command(name = "delete:policy")]
    DeletePolicy(NameArgs),

    /// Create a new form request in a domain.
    #[command(name = "make:request")]
    MakeRequest(UnitInDomainArgs),

    /// Delete an existing form request.
    #[command(name = "delete:request")]
    DeleteRequest(UnitInDomainArgs),

    // ── http & database ───────────────────────────────────────────────────
    /// Create a new controller in a service.
    #[command(name = "make:controller")]
    MakeController(MakeControllerArgs),

    /// Create a migration through the host framework.
    #[command(name = "make:migration")]
    MakeMigration(MakeMigrationArgs),

    // ── project ───────────────────────────────────────────────────────────
    /// Rename the root namespace of the project.
    #[command(name = "src:name")]
    SourceName(NameArgs),

    /// Lay down the monolith skeleton, optionally with a first service.
    #[command(name = "init:monolith")]
    InitMonolith(InitMonolithArgs),

    /// Lay down the microservice skeleton.
    #[command(name = "init:micro")]
    InitMicro,

    /// Fuzzy-search features and jobs by name.
    #[command(
        after_help = "EXAMPLES:\n\
            \x20 strata search createinvoice\n\
            \x20 strata search create invoice --output-format json"
    )]
    Search(SearchArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared argument groups ────────────────────────────────────────────────────

/// A single unit name.
#[derive(Debug, Args)]
pub struct NameArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// A unit living in an (optional) service.
#[derive(Debug, Args)]
pub struct UnitInServiceArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Ignored in a microservice installation.
    #[arg(value_name = "SERVICE")]
    pub service: Option<String>,
}

/// A unit living in a domain.
#[derive(Debug, Args)]
pub struct UnitInDomainArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(value_name = "DOMAIN")]
    pub domain: String,
}

// ── per-command arguments ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeleteServiceArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Delete without asking")]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct MakeFeatureArgs {
    /// Feature name; `/` separates sub-directories.
    #[arg(value_name = "FEATURE")]
    pub name: String,

    #[arg(value_name = "SERVICE")]
    pub service: Option<String>,

    /// Fully qualified job class to run, in order.
    #[arg(long = "job", value_name = "CLASS")]
    pub jobs: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DescribeFeatureArgs {
    #[arg(value_name = "FEATURE")]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ListFeaturesArgs {
    #[arg(value_name = "SERVICE")]
    pub service: Option<String>,
}

#[derive(Debug, Args)]
pub struct MakeOperationArgs {
    #[arg(value_name = "OPERATION")]
    pub name: String,

    #[arg(value_name = "SERVICE")]
    pub service: Option<String>,

    /// Fully qualified job classes to run, in order.
    #[arg(value_name = "JOBS")]
    pub jobs: Vec<String>,

    /// Use the queueable operation stub.
    #[arg(long = "queue")]
    pub queue: bool,
}

#[derive(Debug, Args)]
pub struct MakeJobArgs {
    #[arg(value_name = "JOB")]
    pub name: String,

    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Use the queueable job stub.
    #[arg(short = 'Q', long = "queue")]
    pub queue: bool,
}

#[derive(Debug, Args)]
pub struct ListJobsArgs {
    #[arg(value_name = "DOMAIN")]
    pub domain: Option<String>,
}

#[derive(Debug, Args)]
pub struct MakeControllerArgs {
    #[arg(value_name = "CONTROLLER")]
    pub name: String,

    #[arg(value_name = "SERVICE")]
    pub service: Option<String>,

    /// Generate the seven resource actions (default).
    #[arg(long = "resource", conflicts_with = "plain")]
    pub resource: bool,

    /// Generate an empty controller.
    #[arg(long = "plain")]
    pub plain: bool,
}

#[derive(Debug, Args)]
pub struct MakeMigrationArgs {
    #[arg(value_name = "MIGRATION")]
    pub name: String,

    #[arg(value_name = "SERVICE")]
    pub service: Option<String>,
}

#[derive(Debug, Args)]
pub struct InitMonolithArgs {
    /// First service to create.
    #[arg(value_name = "SERVICE")]
    pub service: Option<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Words are joined before matching.
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `strata completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
