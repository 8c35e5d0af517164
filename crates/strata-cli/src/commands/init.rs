//! `init:monolith` and `init:micro`: lay down the directory skeleton.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use strata_core::domain::Service;

use crate::{
    cli::InitMonolithArgs,
    config::AppConfig,
    context::Workspace,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct InitReport {
    created: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<Service>,
}

/// Monolith skeleton, optionally followed by a first service.
#[instrument(skip_all)]
pub fn monolith(
    args: InitMonolithArgs,
    ws: Workspace,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let created = ws.initializer().init_monolith()?;

    // Services/ now exists, so the project has to be read again as a monolith
    let service = match args.service {
        Some(name) => {
            let ws = ws.reopen(config)?;
            Some(ws.generator().generate_service(&name)?)
        }
        None => None,
    };

    info!(created = created.len(), "Monolith initialised");
    report(output, "Monolith", InitReport { created, service })
}

#[instrument(skip_all)]
pub fn micro(ws: Workspace, output: &OutputManager) -> CliResult<()> {
    let created = ws.initializer().init_micro()?;
    info!(created = created.len(), "Microservice initialised");
    report(
        output,
        "Microservice",
        InitReport {
            created,
            service: None,
        },
    )
}

fn report(output: &OutputManager, mode: &str, report: InitReport) -> CliResult<()> {
    if output.is_json() {
        return Ok(output.json(&report)?);
    }

    if report.created.is_empty() {
        output.info(&format!("{mode} skeleton already in place"))?;
    } else {
        output.success(&format!("{mode} skeleton created"))?;
        for dir in &report.created {
            output.print(&format!("  {}", dir.display()))?;
        }
    }

    if let Some(service) = &report.service {
        output.success(&format!(
            "Service {} created at {}",
            service.name(),
            service.relative_path().display()
        ))?;
    }
    Ok(())
}
