//! Naming rules for generated units.
//!
//! Every user supplied name goes through [`normalize`] before a path or a
//! namespace is computed from it. Suffixed kinds ("Feature", "Job",
//! "Operation", "Policy", "Controller") get their suffix exactly once, so
//! `job("Create")`, `job("CreateJob")` and `job("createJob.php")` all yield
//! `CreateJob`.

use std::fmt;
use std::sync::LazyLock;

use heck::ToSnakeCase;
use regex::Regex;
use serde::Serialize;

use crate::domain::DomainError;

const PHP_EXTENSION: &str = ".php";

/// The kinds of architectural unit the toolkit knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Service,
    Domain,
    Feature,
    Operation,
    Job,
    Model,
    Policy,
    Request,
    Controller,
}

impl UnitKind {
    /// Class-name suffix appended by normalisation, if the kind has one.
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Feature => Some("Feature"),
            Self::Operation => Some("Operation"),
            Self::Job => Some("Job"),
            Self::Policy => Some("Policy"),
            Self::Controller => Some("Controller"),
            Self::Service | Self::Domain | Self::Model | Self::Request => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Domain => "Domain",
            Self::Feature => "Feature",
            Self::Operation => "Operation",
            Self::Job => "Job",
            Self::Model => "Model",
            Self::Policy => "Policy",
            Self::Request => "Request",
            Self::Controller => "Controller",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Case conversion ───────────────────────────────────────────────────────────

/// Convert a value to StudlyCase.
///
/// `-` and `_` act as word breaks, every word gets an upper-case first
/// character and words are concatenated. Capitals already inside a word are
/// kept, which makes the conversion idempotent.
pub fn studly(value: &str) -> String {
    value
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(upper_first)
        .collect()
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a value to snake_case (service slugs, test method names).
pub fn snake(value: &str) -> String {
    value.to_snake_case()
}

// ── Normalisation ─────────────────────────────────────────────────────────────

/// Canonicalise `raw` into the standard class name for `kind`.
///
/// Feature names may carry `/`-separated sub-directories; each segment is
/// StudlyCased on its own and only the last one receives the suffix.
pub fn normalize(kind: UnitKind, raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_name(kind, raw, "name cannot be empty"));
    }

    if kind == UnitKind::Feature && trimmed.contains('/') {
        return feature_path(trimmed);
    }

    class_name(kind, trimmed)
}

fn feature_path(raw: &str) -> Result<String, DomainError> {
    let mut segments: Vec<&str> = raw.split('/').collect();
    let last = segments.pop().unwrap_or_default();

    let mut parts = Vec::with_capacity(segments.len() + 1);
    for segment in segments {
        let dir = studly(segment);
        if dir.is_empty() {
            return Err(DomainError::invalid_name(
                UnitKind::Feature,
                raw,
                "sub-directory segments cannot be empty",
            ));
        }
        check_identifier(UnitKind::Feature, raw, &dir)?;
        parts.push(dir);
    }
    parts.push(class_name(UnitKind::Feature, last)?);

    Ok(parts.join("/"))
}

fn class_name(kind: UnitKind, raw: &str) -> Result<String, DomainError> {
    let name = match kind.suffix() {
        Some(suffix) => {
            let stem = strip_kind_suffix(raw, suffix);
            if studly(stem).is_empty() {
                return Err(DomainError::invalid_name(
                    kind,
                    raw,
                    format!("nothing is left once the '{suffix}' suffix is removed"),
                ));
            }
            studly(&format!("{stem}{suffix}"))
        }
        None => studly(raw.strip_suffix(PHP_EXTENSION).unwrap_or(raw)),
    };

    if name.is_empty() {
        return Err(DomainError::invalid_name(kind, raw, "name cannot be empty"));
    }
    check_identifier(kind, raw, &name)?;

    Ok(name)
}

/// Case-sensitive `<Suffix>(\.php)?$` removal. A bare `.php` extension is
/// dropped too.
fn strip_kind_suffix<'a>(raw: &'a str, suffix: &str) -> &'a str {
    let base = raw.strip_suffix(PHP_EXTENSION).unwrap_or(raw);
    base.strip_suffix(suffix).unwrap_or(base)
}

fn check_identifier(kind: UnitKind, raw: &str, name: &str) -> Result<(), DomainError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(DomainError::invalid_name(
            kind,
            raw,
            format!("'{name}' is not a valid class name"),
        ))
    }
}

/// Validate a backslash separated PHP namespace such as `Acme\Billing`.
pub fn validate_namespace(namespace: &str) -> Result<(), DomainError> {
    let trimmed = namespace.trim_matches('\\');
    if trimmed.is_empty() {
        return Err(DomainError::InvalidNamespace {
            namespace: namespace.to_string(),
            reason: "namespace cannot be empty".into(),
        });
    }

    for segment in trimmed.split('\\') {
        check_identifier(UnitKind::Service, namespace, segment).map_err(|_| {
            DomainError::InvalidNamespace {
                namespace: namespace.to_string(),
                reason: format!("'{segment}' is not a valid namespace segment"),
            }
        })?;
    }
    Ok(())
}

pub fn feature(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Feature, raw)
}

pub fn job(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Job, raw)
}

pub fn operation(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Operation, raw)
}

pub fn domain(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Domain, raw)
}

pub fn service(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Service, raw)
}

pub fn model(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Model, raw)
}

pub fn policy(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Policy, raw)
}

pub fn request(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Request, raw)
}

pub fn controller(raw: &str) -> Result<String, DomainError> {
    normalize(UnitKind::Controller, raw)
}

// ── Titles ────────────────────────────────────────────────────────────────────

/// Turn a StudlyCase file name into a human readable title.
///
/// `strip` is removed first, then the remainder is split in front of every
/// upper-case letter: `CreatePostFeature.php` with `Feature\.php$` gives
/// `"Create Post"`. An empty result means the input carried no name at all.
pub fn real_name(name: &str, strip: &Regex) -> String {
    let stripped = strip.replace_all(name, "");

    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in stripped.chars() {
        if ch.is_ascii_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join(" ")
}

static FEATURE_FILE: LazyLock<Regex> = LazyLock::new(|| compile(r"Feature(\.php)?$"));
static OPERATION_FILE: LazyLock<Regex> = LazyLock::new(|| compile(r"Operation(\.php)?$"));
static JOB_FILE: LazyLock<Regex> = LazyLock::new(|| compile(r"Job(\.php)?$"));
static POLICY_FILE: LazyLock<Regex> = LazyLock::new(|| compile(r"Policy(\.php)?$"));
static CONTROLLER_FILE: LazyLock<Regex> = LazyLock::new(|| compile(r"Controller(\.php)?$"));
static PHP_FILE: LazyLock<Regex> = LazyLock::new(|| compile(r"\.php$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("built-in pattern {pattern} is invalid: {e}"))
}

/// Title of a unit file, stripping the suffix that belongs to `kind`.
pub fn title(kind: UnitKind, file_name: &str) -> String {
    let pattern: &Regex = match kind {
        UnitKind::Feature => &FEATURE_FILE,
        UnitKind::Operation => &OPERATION_FILE,
        UnitKind::Job => &JOB_FILE,
        UnitKind::Policy => &POLICY_FILE,
        UnitKind::Controller => &CONTROLLER_FILE,
        UnitKind::Service | UnitKind::Domain | UnitKind::Model | UnitKind::Request => &PHP_FILE,
    };
    real_name(file_name, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studly_handles_separators_and_spaces() {
        assert_eq!(studly("create-invoice"), "CreateInvoice");
        assert_eq!(studly("create_invoice"), "CreateInvoice");
        assert_eq!(studly("create invoice"), "CreateInvoice");
        assert_eq!(studly("createInvoice"), "CreateInvoice");
    }

    #[test]
    fn studly_keeps_inner_capitals() {
        assert_eq!(studly("sendHTTPRequest"), "SendHTTPRequest");
        assert_eq!(studly(&studly("send-HTTP-request")), studly("send-HTTP-request"));
    }

    #[test]
    fn job_suffix_is_added_once() {
        assert_eq!(job("Create").unwrap(), "CreateJob");
        assert_eq!(job("CreateJob").unwrap(), "CreateJob");
        assert_eq!(job("createJob.php").unwrap(), "CreateJob");
        assert_eq!(job("create invoice").unwrap(), "CreateInvoiceJob");
    }

    #[test]
    fn normalisation_is_idempotent() {
        let inputs = [
            "create",
            "CreatePost",
            "create-post",
            "create_post.php",
            "send mail",
            "ValidateJob",
        ];
        let kinds = [
            UnitKind::Feature,
            UnitKind::Job,
            UnitKind::Operation,
            UnitKind::Domain,
            UnitKind::Service,
            UnitKind::Model,
            UnitKind::Policy,
            UnitKind::Request,
            UnitKind::Controller,
        ];

        for kind in kinds {
            for input in inputs {
                let once = normalize(kind, input).unwrap();
                let twice = normalize(kind, &once).unwrap();
                assert_eq!(once, twice, "{kind} normalisation of {input:?}");
            }
        }
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        // a lower-case "job" is part of the name, not the suffix
        assert_eq!(job("create job").unwrap(), "CreateJobJob");
    }

    #[test]
    fn feature_paths_keep_sub_directories() {
        assert_eq!(
            feature("billing/create-invoice").unwrap(),
            "Billing/CreateInvoiceFeature"
        );
        assert_eq!(
            feature("Billing/CreateInvoiceFeature.php").unwrap(),
            "Billing/CreateInvoiceFeature"
        );
        assert_eq!(
            feature("admin/reports/monthly").unwrap(),
            "Admin/Reports/MonthlyFeature"
        );
    }

    #[test]
    fn feature_path_rejects_empty_segment() {
        assert!(feature("billing//create").is_err());
    }

    #[test]
    fn other_suffixed_kinds() {
        assert_eq!(operation("charge card").unwrap(), "ChargeCardOperation");
        assert_eq!(policy("PostPolicy.php").unwrap(), "PostPolicy");
        assert_eq!(controller("invoice").unwrap(), "InvoiceController");
    }

    #[test]
    fn plain_kinds_are_only_studly_cased() {
        assert_eq!(domain("billing").unwrap(), "Billing");
        assert_eq!(service("web-api").unwrap(), "WebApi");
        assert_eq!(model("blog_post").unwrap(), "BlogPost");
        assert_eq!(model("Post.php").unwrap(), "Post");
        assert_eq!(request("store invoice").unwrap(), "StoreInvoice");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(matches!(
            job("   "),
            Err(DomainError::InvalidName { kind: UnitKind::Job, .. })
        ));
        assert!(job("Job").is_err());
        assert!(job("Job.php").is_err());
        assert!(domain("").is_err());
        assert!(service("--").is_err());
    }

    #[test]
    fn non_identifiers_are_rejected() {
        assert!(job("1st").is_err());
        assert!(model("Post.Model").is_err());
        assert!(feature("create!").is_err());
    }

    #[test]
    fn real_name_splits_on_capitals() {
        let strip = Regex::new(r"Feature\.php$").unwrap();
        assert_eq!(real_name("CreatePostFeature.php", &strip), "Create Post");
    }

    #[test]
    fn real_name_of_bare_suffix_is_empty() {
        let strip = Regex::new(r"Job\.php$").unwrap();
        assert_eq!(real_name("Job.php", &strip), "");
    }

    #[test]
    fn title_uses_kind_suffix() {
        assert_eq!(title(UnitKind::Job, "CreateInvoiceJob.php"), "Create Invoice");
        assert_eq!(title(UnitKind::Model, "BlogPost.php"), "Blog Post");
        assert_eq!(title(UnitKind::Operation, "ChargeCardOperation"), "Charge Card");
    }

    #[test]
    fn snake_case_for_slugs() {
        assert_eq!(snake("WebApi"), "web_api");
        assert_eq!(snake("CreateInvoiceJob"), "create_invoice_job");
    }

    #[test]
    fn namespace_validation() {
        assert!(validate_namespace("Acme").is_ok());
        assert!(validate_namespace("Acme\\Billing").is_ok());
        assert!(validate_namespace("").is_err());
        assert!(validate_namespace("Acme\\\\Billing").is_err());
        assert!(validate_namespace("Acme\\9lives").is_err());
    }
}
