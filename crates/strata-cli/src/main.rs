//! # Strata CLI
//!
//! Unit scaffolding for layered PHP service projects.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Open the project and dispatch to the command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | Internal / system error                  |
//! |  2   | User error (bad name, already exists)    |
//! |  3   | Unit, service or domain not found        |
//! |  4   | Configuration error                      |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    context::Workspace,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        project = %cli.global.project.display(),
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: Some(e.into()),
                },
                verbose,
            );
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, &config, &output) {
        Ok(()) => {
            info!("Strata completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    use commands::{delete, describe, init, list, make, migration, search, source};

    let Cli { global, command } = cli;
    // every command but `completions` works on the project
    let open = || Workspace::open(&global, config);

    match command {
        Commands::MakeService(args) => make::service(args, &open()?, output),
        Commands::DeleteService(args) => delete::service(args, &open()?, output),
        Commands::ListServices => list::services(&open()?, output),

        Commands::MakeFeature(args) => make::feature(args, &open()?, output),
        Commands::DeleteFeature(args) => delete::feature(args, &open()?, output),
        Commands::DescribeFeature(args) => describe::execute(args, &open()?, output),
        Commands::ListFeatures(args) => list::features(args, &open()?, output),

        Commands::MakeOperation(args) => make::operation(args, &open()?, output),
        Commands::DeleteOperation(args) => delete::operation(args, &open()?, output),

        Commands::MakeJob(args) => make::job(args, &open()?, output),
        Commands::DeleteJob(args) => delete::job(args, &open()?, output),
        Commands::ListJobs(args) => list::jobs(args, &open()?, output),
        Commands::ListDomains => list::domains(&open()?, output),

        Commands::MakeModel(args) => make::model(args, &open()?, output),
        Commands::DeleteModel(args) => delete::model(args, &open()?, output),
        Commands::MakePolicy(args) => make::policy(args, &open()?, output),
        Commands::DeletePolicy(args) => delete::policy(args, &open()?, output),
        Commands::MakeRequest(args) => make::request(args, &open()?, output),
        Commands::DeleteRequest(args) => delete::request(args, &open()?, output),

        Commands::MakeController(args) => make::controller(args, &open()?, output),
        Commands::MakeMigration(args) => migration::execute(args, &open()?, config, output),

        Commands::SourceName(args) => source::execute(args, &open()?, output),
        Commands::InitMonolith(args) => init::monolith(args, open()?, config, output),
        Commands::InitMicro => init::micro(open()?, output),
        Commands::Search(args) => search::execute(args, &open()?, output),

        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// This is the single place where structured errors become human-readable
/// output and OS exit codes.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message shows even when stdout is redirected
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }
}
