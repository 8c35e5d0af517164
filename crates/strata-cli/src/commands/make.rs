//! `make:*` commands.

use tracing::instrument;

use strata_core::domain::ControllerStyle;

use crate::{
    cli::{
        MakeControllerArgs, MakeFeatureArgs, MakeJobArgs, MakeOperationArgs, NameArgs,
        UnitInDomainArgs,
    },
    commands::{parse_jobs, report_created},
    context::Workspace,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(service = %args.name))]
pub fn service(args: NameArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let service = ws.generator().generate_service(&args.name)?;

    if output.is_json() {
        return Ok(output.json(&service)?);
    }

    let providers = format!(
        "{}\\Providers\\{}ServiceProvider",
        ws.layout().as_monolith().service_namespace(Some(service.name())),
        service.name()
    );
    output.success(&format!("Service {} created", service.name()))?;
    output.print(&format!("  {}", service.relative_path().display()))?;
    output.print("")?;
    output.info(&format!(
        "Activate it by registering {providers} in the providers array of config/app.php"
    ))?;
    Ok(())
}

#[instrument(skip_all, fields(feature = %args.name))]
pub fn feature(args: MakeFeatureArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let jobs = parse_jobs(&args.jobs)?;
    let unit = ws
        .generator()
        .generate_feature(&args.name, args.service.as_deref(), &jobs)?;
    report_created(output, &unit)
}

#[instrument(skip_all, fields(operation = %args.name))]
pub fn operation(
    args: MakeOperationArgs,
    ws: &Workspace,
    output: &OutputManager,
) -> CliResult<()> {
    let jobs = parse_jobs(&args.jobs)?;
    let unit = ws.generator().generate_operation(
        &args.name,
        args.service.as_deref(),
        args.queue,
        &jobs,
    )?;
    report_created(output, &unit)
}

#[instrument(skip_all, fields(job = %args.name, domain = %args.domain))]
pub fn job(args: MakeJobArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let unit = ws
        .generator()
        .generate_job(&args.name, &args.domain, args.queue)?;
    report_created(output, &unit)
}

pub fn model(args: NameArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let unit = ws.generator().generate_model(&args.name)?;
    report_created(output, &unit)
}

pub fn policy(args: NameArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let unit = ws.generator().generate_policy(&args.name)?;
    report_created(output, &unit)
}

pub fn request(args: UnitInDomainArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let unit = ws.generator().generate_request(&args.name, &args.domain)?;
    report_created(output, &unit)
}

#[instrument(skip_all, fields(controller = %args.name))]
pub fn controller(
    args: MakeControllerArgs,
    ws: &Workspace,
    output: &OutputManager,
) -> CliResult<()> {
    let unit = ws.generator().generate_controller(
        &args.name,
        args.service.as_deref(),
        controller_style(&args),
    )?;
    report_created(output, &unit)
}

fn controller_style(args: &MakeControllerArgs) -> ControllerStyle {
    if args.plain {
        ControllerStyle::Plain
    } else {
        ControllerStyle::Resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_args(resource: bool, plain: bool) -> MakeControllerArgs {
        MakeControllerArgs {
            name: "Invoice".into(),
            service: None,
            resource,
            plain,
        }
    }

    #[test]
    fn controller_defaults_to_resource() {
        assert_eq!(
            controller_style(&controller_args(false, false)),
            ControllerStyle::Resource
        );
        assert_eq!(
            controller_style(&controller_args(true, false)),
            ControllerStyle::Resource
        );
    }

    #[test]
    fn plain_flag_selects_plain_stub() {
        assert_eq!(
            controller_style(&controller_args(false, true)),
            ControllerStyle::Plain
        );
    }
}
