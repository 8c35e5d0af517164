//! Command handlers.
//!
//! Each handler translates parsed arguments into calls on the core services
//! and prints the outcome. No naming or layout rules live here.

pub mod completions;
pub mod delete;
pub mod describe;
pub mod init;
pub mod list;
pub mod make;
pub mod migration;
pub mod search;
pub mod source;

use strata_core::{
    domain::{JobRef, UnitDescriptor},
    error::StrataError,
};

use crate::{error::CliResult, output::OutputManager};

/// Report a freshly generated unit.
pub(crate) fn report_created(output: &OutputManager, unit: &UnitDescriptor) -> CliResult<()> {
    if output.is_json() {
        return Ok(output.json(unit)?);
    }
    output.success(&format!(
        "{} {} created",
        unit.kind(),
        unit.class_name()
    ))?;
    output.print(&format!("  {}", unit.relative_path().display()))?;
    Ok(())
}

/// Parse fully qualified job class names given on the command line.
pub(crate) fn parse_jobs(raw: &[String]) -> CliResult<Vec<JobRef>> {
    raw.iter()
        .map(|job| JobRef::parse_qualified(job).map_err(StrataError::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_jobs_keeps_order() {
        let jobs = parse_jobs(&[
            "App\\Domains\\Billing\\Jobs\\CreateInvoiceJob".into(),
            "\\App\\Domains\\Mail\\Jobs\\SendInvoiceJob".into(),
        ])
        .unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].class_name(), "CreateInvoiceJob");
        assert_eq!(jobs[1].namespace(), "App\\Domains\\Mail\\Jobs");
    }

    #[test]
    fn unqualified_job_is_rejected() {
        let err = parse_jobs(&["CreateInvoiceJob".into()]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
