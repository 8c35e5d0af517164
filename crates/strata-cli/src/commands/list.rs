//! `list:*` commands.

use std::collections::BTreeMap;

use strata_core::domain::UnitDescriptor;

use crate::{
    cli::{ListFeaturesArgs, ListJobsArgs},
    context::Workspace,
    error::CliResult,
    output::OutputManager,
};

pub fn services(ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let services = ws.catalog().list_services()?;

    if output.is_json() {
        return Ok(output.json(&services)?);
    }
    if services.is_empty() {
        output.info("No services found")?;
        return Ok(());
    }

    let mut rows = vec![header(&["Service", "Slug", "Path"])];
    rows.extend(services.iter().map(|service| {
        vec![
            service.name().to_string(),
            service.slug().to_string(),
            service.relative_path().display().to_string(),
        ]
    }));
    Ok(output.rows(&rows)?)
}

pub fn domains(ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let domains = ws.catalog().list_domains()?;

    if output.is_json() {
        return Ok(output.json(&domains)?);
    }
    if domains.is_empty() {
        output.info("No domains found")?;
        return Ok(());
    }

    let mut rows = vec![header(&["Domain", "Namespace", "Path"])];
    rows.extend(domains.iter().map(|domain| {
        vec![
            domain.name().to_string(),
            domain.namespace().to_string(),
            domain.relative_path().display().to_string(),
        ]
    }));
    Ok(output.rows(&rows)?)
}

pub fn features(args: ListFeaturesArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let groups = ws.catalog().list_features(args.service.as_deref())?;
    print_groups(output, &groups, &["Feature", "Service", "File", "Path"], |unit| {
        vec![
            unit.title().to_string(),
            unit.service().map(|s| s.name().to_string()).unwrap_or_default(),
            unit.file_name().to_string(),
            unit.relative_path().display().to_string(),
        ]
    })
}

pub fn jobs(args: ListJobsArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let groups = ws.catalog().list_jobs(args.domain.as_deref())?;
    print_groups(output, &groups, &["Job", "Domain", "File", "Path"], |unit| {
        vec![
            unit.title().to_string(),
            unit.domain().map(|d| d.name().to_string()).unwrap_or_default(),
            unit.file_name().to_string(),
            unit.relative_path().display().to_string(),
        ]
    })
}

/// One header line per group followed by its aligned rows.
fn print_groups<F>(
    output: &OutputManager,
    groups: &BTreeMap<String, Vec<UnitDescriptor>>,
    columns: &[&str],
    row: F,
) -> CliResult<()>
where
    F: Fn(&UnitDescriptor) -> Vec<String>,
{
    if output.is_json() {
        return Ok(output.json(groups)?);
    }
    if groups.is_empty() {
        output.info("Nothing found")?;
        return Ok(());
    }

    for (index, (group, units)) in groups.iter().enumerate() {
        if index > 0 {
            output.print("")?;
        }
        output.header(group)?;

        let mut rows = vec![header(columns)];
        rows.extend(units.iter().map(&row));
        output.rows(&rows)?;
    }
    Ok(())
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| (*c).to_string()).collect()
}
