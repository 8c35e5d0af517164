//! `src:name`: rename the project's root namespace.

use tracing::instrument;

use crate::{cli::NameArgs, context::Workspace, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(namespace = %args.name))]
pub fn execute(args: NameArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let change = ws.rewriter().rewrite(&args.name)?;

    if output.is_json() {
        return Ok(output.json(&change)?);
    }

    output.success(&format!(
        "Source namespace changed from {} to {}",
        change.old, change.new
    ))?;
    for file in &change.files {
        output.print(&format!("  {}", file.display()))?;
    }
    output.print("")?;
    output.info("Run composer dump-autoload to refresh the autoloader")?;
    Ok(())
}
