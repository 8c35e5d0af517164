//! `make:migration`: delegates to the host framework's migration generator.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info, instrument};

use crate::{
    cli::MakeMigrationArgs,
    config::AppConfig,
    context::Workspace,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(migration = %args.name))]
pub fn execute(
    args: MakeMigrationArgs,
    ws: &Workspace,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let path = ws.layout().migration_path(args.service.as_deref());
    let (program, arguments) = command_line(&config.migration.command, &args.name, &path)?;
    let display = std::iter::once(program.as_str())
        .chain(arguments.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    output.info(&format!("Running {display}"))?;
    debug!(cwd = %ws.base().display(), "Spawning migration command");

    let status = Command::new(&program)
        .args(&arguments)
        .current_dir(ws.base())
        .status()
        .map_err(|e| CliError::ExternalCommandFailed {
            command: display.clone(),
            source: Some(Box::new(e)),
        })?;

    if !status.success() {
        return Err(CliError::ExternalCommandFailed {
            command: display,
            source: Some(Box::new(std::io::Error::other(format!(
                "exited with {status}"
            )))),
        });
    }

    info!(path = %path.display(), "Migration created");
    output.success(&format!("Migration created in {}", path.display()))?;
    Ok(())
}

/// Split the configured command and append the migration name and path.
fn command_line(command: &str, name: &str, path: &Path) -> CliResult<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next().ok_or_else(|| CliError::ConfigError {
        message: "migration.command is empty".into(),
        source: None,
    })?;

    let mut arguments: Vec<String> = parts.collect();
    arguments.push(name.to_string());
    arguments.push(format!("--path={}", path.display()));
    Ok((program, arguments))
}
