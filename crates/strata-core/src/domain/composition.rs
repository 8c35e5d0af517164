//! Unit composition: the `use` imports and `$this->run(...)` calls a feature
//! or operation makes, both when generating and when describing one.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::{DomainError, UnitKind};

/// A reference to a unit run from inside a feature or operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct JobRef {
    namespace: String,
    class_name: String,
}

impl JobRef {
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into().trim_matches('\\').to_string(),
            class_name: class_name.into(),
        }
    }

    /// Split a fully qualified class name at its last `\`.
    pub fn parse_qualified(qualified: &str) -> Result<Self, DomainError> {
        let trimmed = qualified.trim().trim_start_matches('\\');
        match trimmed.rsplit_once('\\') {
            Some((namespace, class_name)) if !namespace.is_empty() && !class_name.is_empty() => {
                Ok(Self::new(namespace, class_name))
            }
            _ => Err(DomainError::invalid_name(
                UnitKind::Job,
                qualified,
                "expected a fully qualified class name such as App\\Domains\\Billing\\Jobs\\CreateInvoiceJob",
            )),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Namespace is empty when the class was referenced without an import.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}\\{}", self.namespace, self.class_name)
        }
    }

    /// Kind guessed from the class-name suffix.
    pub fn kind(&self) -> Option<UnitKind> {
        [UnitKind::Job, UnitKind::Operation, UnitKind::Feature]
            .into_iter()
            .find(|kind| {
                kind.suffix()
                    .is_some_and(|suffix| self.class_name.ends_with(suffix))
            })
    }
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Rendered `{{use_jobs}}` and `{{run_jobs}}` placeholder values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocations {
    pub imports: String,
    pub runs: String,
}

const RUN_INDENT: &str = "\t\t";

/// One `use` line per job and one `$this->run(...)` call per job, calls
/// separated by a blank line.
pub fn render_invocations(jobs: &[JobRef]) -> Invocations {
    let imports = jobs
        .iter()
        .map(|job| format!("use {};\n", job.qualified_name()))
        .collect();
    let runs = jobs
        .iter()
        .map(|job| format!("{RUN_INDENT}$this->run({}::class);", job.class_name()))
        .collect::<Vec<_>>()
        .join("\n\n");

    Invocations { imports, runs }
}

static USE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*use\s+\\?([A-Za-z_][\w\\]*?)(?:\s+as\s+([A-Za-z_]\w*))?\s*;")
        .unwrap_or_else(|e| panic!("built-in use pattern is invalid: {e}"))
});

static RUN_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$this->run(?:InQueue)?\(\s*(?:new\s+)?(\\?[A-Za-z_][\w\\]*)")
        .unwrap_or_else(|e| panic!("built-in run pattern is invalid: {e}"))
});

/// Recover the units a feature or operation runs, in call order.
///
/// Short class names are resolved through the file's `use` imports. A unit
/// run more than once appears once per call.
pub fn parse_invocations(source: &str) -> Vec<JobRef> {
    let imports: HashMap<String, String> = USE_LINE
        .captures_iter(source)
        .filter_map(|caps| {
            let qualified = caps.get(1)?.as_str();
            let alias = caps
                .get(2)
                .map(|m| m.as_str())
                .or_else(|| qualified.rsplit('\\').next())?;
            Some((alias.to_string(), qualified.to_string()))
        })
        .collect();

    RUN_CALL
        .captures_iter(source)
        .filter_map(|caps| {
            let reference = caps.get(1)?.as_str().trim_start_matches('\\');
            if reference.contains('\\') {
                return JobRef::parse_qualified(reference).ok();
            }
            Some(match imports.get(reference) {
                Some(qualified) => JobRef::parse_qualified(qualified)
                    .unwrap_or_else(|_| JobRef::new("", reference)),
                None => JobRef::new("", reference),
            })
        })
        .collect()
}
