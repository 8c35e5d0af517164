//! `delete:*` commands.

use tracing::{info, instrument};

use strata_core::{
    application::{ApplicationError, Removal},
    error::StrataError,
};

use crate::{
    cli::{DeleteServiceArgs, NameArgs, UnitInDomainArgs, UnitInServiceArgs},
    context::Workspace,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(service = %args.name))]
pub fn service(args: DeleteServiceArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    if ws.layout().is_microservice() {
        return Err(StrataError::from(ApplicationError::Unsupported {
            operation: "Deleting a service",
        })
        .into());
    }

    // look it up first so a typo fails before the prompt
    let found = ws.catalog().find_service(&args.name)?;

    if !args.yes
        && !confirm(&format!(
            "Delete service {} and everything in {}?",
            found.name(),
            found.relative_path().display()
        ))?
    {
        info!(service = found.name(), "Deletion declined");
        return Err(CliError::Cancelled);
    }

    let removal = ws.remover().delete_service(found.name())?;
    report_removed(output, &removal)?;
    output.info("Please remove your registered service providers from config/app.php")?;
    Ok(())
}

pub fn feature(args: UnitInServiceArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let removal = ws
        .remover()
        .delete_feature(&args.name, args.service.as_deref())?;
    report_removed(output, &removal)
}

pub fn operation(args: UnitInServiceArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let removal = ws
        .remover()
        .delete_operation(&args.name, args.service.as_deref())?;
    report_removed(output, &removal)
}

pub fn job(args: UnitInDomainArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let removal = ws.remover().delete_job(&args.name, &args.domain)?;
    report_removed(output, &removal)
}

pub fn model(args: NameArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let removal = ws.remover().delete_model(&args.name)?;
    report_removed(output, &removal)
}

pub fn policy(args: NameArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let removal = ws.remover().delete_policy(&args.name)?;
    report_removed(output, &removal)
}

pub fn request(args: UnitInDomainArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let removal = ws.remover().delete_request(&args.name, &args.domain)?;
    report_removed(output, &removal)
}

fn report_removed(output: &OutputManager, removal: &Removal) -> CliResult<()> {
    if output.is_json() {
        return Ok(output.json(removal)?);
    }

    output.success(&format!("{} {} deleted", removal.kind, removal.name))?;
    output.print(&format!("  {}", removal.path.display()))?;
    if let Some(dir) = &removal.cascaded {
        output.info(&format!(
            "Domain directory {} removed with its last job",
            dir.display()
        ))?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "cannot ask for confirmation without a terminal, pass --yes".into(),
            source: None,
        });
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
