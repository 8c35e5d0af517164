//! Namespace Rewriter - renames the project's root namespace.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ports::ProjectManifest, services::project::Project},
    domain::naming,
    error::StrataResult,
};

/// Directories never touched by the rewrite.
const EXCLUDED_DIRS: [&str; 1] = ["vendor"];

/// Outcome of a namespace rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceChange {
    pub old: String,
    pub new: String,
    /// Project-relative paths of the PHP files that changed.
    pub files: Vec<PathBuf>,
}

/// Rewrites the manifest's PSR-4 key, then `namespace Old;` declarations and
/// `Old\` references in every PHP file of the project (`vendor/` excluded,
/// `config/app.php` included).
pub struct NamespaceRewriter<'a> {
    project: &'a Project,
    manifest: &'a dyn ProjectManifest,
}

impl<'a> NamespaceRewriter<'a> {
    pub fn new(project: &'a Project, manifest: &'a dyn ProjectManifest) -> Self {
        Self { project, manifest }
    }

    #[instrument(skip(self))]
    pub fn rewrite(&self, new_namespace: &str) -> StrataResult<NamespaceChange> {
        let new = new_namespace.trim().trim_matches('\\').to_string();
        naming::validate_namespace(&new)?;

        let old = self.project.layout().root_namespace().to_string();

        // fails on a missing key before any file is touched
        self.manifest.replace_namespace(&old, &new)?;

        let mut changed = Vec::new();

        for path in self.php_files()? {
            let content = self.project.files().read_to_string(&path)?;
            if !content.contains(&old) {
                continue;
            }

            let rewritten = replace_namespace(&content, &old, &new);
            if rewritten != content {
                self.project.files().write_file(&path, &rewritten)?;
                debug!(path = %path.display(), "Namespace rewritten");
                changed.push(self.project.layout().relative_from_real(&path));
            }
        }

        info!(%old, %new, files = changed.len(), "Root namespace changed");
        Ok(NamespaceChange {
            old,
            new,
            files: changed,
        })
    }

    fn php_files(&self) -> StrataResult<Vec<PathBuf>> {
        let base = self.project.layout().base_path();
        let files = self.project.files();

        let mut found: Vec<PathBuf> = files.list_files(base)?;
        for dir in files.list_dirs(base)? {
            if is_excluded(&dir) {
                continue;
            }
            found.extend(files.walk_files(&dir)?);
        }

        found.retain(|path| path.extension().is_some_and(|ext| ext == "php"));
        found.sort();
        Ok(found)
    }
}

fn is_excluded(dir: &Path) -> bool {
    dir.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

fn replace_namespace(content: &str, old: &str, new: &str) -> String {
    content
        .replace(&format!("namespace {old};"), &format!("namespace {new};"))
        .replace(&format!("{old}\\"), &format!("{new}\\"))
}
