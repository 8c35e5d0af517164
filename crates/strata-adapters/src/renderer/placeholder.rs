//! `{{key}}` placeholder substitution.

use strata_core::{application::ports::TemplateRenderer, domain::Bindings, error::StrataResult};
use tracing::{debug, instrument};

/// Renderer replacing every bound `{{key}}` with its value.
///
/// Placeholders without a binding are left in place, so a stub can carry
/// literal braces (Blade echoes, for instance) untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    #[instrument(skip_all, fields(bindings = bindings.len()))]
    fn render(&self, template: &str, bindings: &Bindings) -> StrataResult<String> {
        let mut result = template.to_string();

        for (key, value) in bindings.iter() {
            let placeholder = format!("{{{{{key}}}}}");
            if !result.contains(&placeholder) {
                debug!(key, "Binding not used by template");
                continue;
            }
            result = result.replace(&placeholder, value);
        }

        Ok(result)
    }
}
