//! `describe:feature`: the jobs a feature runs, in call order.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, instrument};

use strata_core::{
    domain::{JobRef, UnitDescriptor, composition::parse_invocations},
    error::ErrorCategory,
};

use crate::{
    cli::DescribeFeatureArgs, context::Workspace, error::CliResult, output::OutputManager,
};

#[derive(Debug, Serialize)]
struct FeatureDescription {
    feature: UnitDescriptor,
    jobs: Vec<JobEntry>,
}

/// A job run by the feature. Jobs missing from the project keep only the
/// reference found in the source.
#[derive(Debug, Serialize)]
struct JobEntry {
    position: usize,
    class_name: String,
    namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

#[instrument(skip_all, fields(feature = %args.name))]
pub fn execute(args: DescribeFeatureArgs, ws: &Workspace, output: &OutputManager) -> CliResult<()> {
    let catalog = ws.catalog();
    let feature = catalog.find_feature(&args.name)?;
    let invocations = parse_invocations(feature.content().unwrap_or_default());
    debug!(jobs = invocations.len(), "Invocations parsed");

    let jobs = invocations
        .iter()
        .enumerate()
        .map(|(index, job)| resolve(ws, index + 1, job))
        .collect::<CliResult<Vec<_>>>()?;

    if output.is_json() {
        return Ok(output.json(&FeatureDescription { feature, jobs })?);
    }

    output.header(&format!("{} ({})", feature.title(), feature.relative_path().display()))?;
    if jobs.is_empty() {
        output.info("This feature runs no jobs")?;
        return Ok(());
    }

    let mut rows = vec![vec![
        "#".to_string(),
        "Job".into(),
        "Domain".into(),
        "Path".into(),
    ]];
    rows.extend(jobs.iter().map(|job| {
        vec![
            job.position.to_string(),
            job.title.clone().unwrap_or_else(|| job.class_name.clone()),
            job.domain.clone().unwrap_or_else(|| job.namespace.clone()),
            job.path
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| p.display().to_string()),
        ]
    }));
    output.rows(&rows)?;

    let missing = jobs.iter().filter(|job| job.path.is_none()).count();
    if missing > 0 {
        output.warning(&format!("{missing} of {} jobs not found in the project", jobs.len()))?;
    }
    Ok(())
}

fn resolve(ws: &Workspace, position: usize, job: &JobRef) -> CliResult<JobEntry> {
    let mut entry = JobEntry {
        position,
        class_name: job.class_name().to_string(),
        namespace: job.namespace().to_string(),
        title: None,
        domain: None,
        path: None,
    };

    match ws.catalog().find_job_ref(job) {
        Ok(found) => {
            entry.title = Some(found.title().to_string());
            entry.domain = found.domain().map(|d| d.name().to_string());
            entry.path = Some(found.relative_path().to_path_buf());
        }
        // operations and missing jobs stay unresolved
        Err(e) if e.is_not_found() || e.category() == ErrorCategory::Validation => {
            debug!(job = %job, "Job not found in the project");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(entry)
}
