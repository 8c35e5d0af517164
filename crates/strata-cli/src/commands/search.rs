//! `search`: fuzzy lookup of features and jobs by name.

use tracing::instrument;

use strata_core::domain::UnitDescriptor;

use crate::{cli::SearchArgs, context::Workspace, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(args: SearchArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let query = args.query.join(" ");
    let results = ws.catalog().search(&query)?;

    if output.is_json() {
        return Ok(output.json(&results)?);
    }
    if results.is_empty() {
        output.info(&format!("Nothing matches \"{query}\""))?;
        return Ok(());
    }

    print_section(output, "Features", &results.features)?;
    if !results.features.is_empty() && !results.jobs.is_empty() {
        output.print("")?;
    }
    print_section(output, "Jobs", &results.jobs)
}

fn print_section(output: &OutputManager, title: &str, units: &[UnitDescriptor]) -> CliResult<()> {
    if units.is_empty() {
        return Ok(());
    }

    output.header(title)?;
    let mut rows = vec![vec!["Name".to_string(), "Path".into()]];
    rows.extend(units.iter().map(|unit| {
        vec![
            unit.title().to_string(),
            unit.relative_path().display().to_string(),
        ]
    }));
    Ok(output.rows(&rows)?)
}
