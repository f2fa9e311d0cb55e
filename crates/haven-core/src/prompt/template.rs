//! Structured `{{placeholder}}` template rendering.
//!
//! Construction validates that the template's placeholder set exactly
//! matches the declared field set, so drift between template text and the
//! code that fills it is caught when the template is built, not when a
//! prompt half-renders at runtime.

use std::collections::{BTreeSet, HashMap};

use crate::error::{CoreError, Result};

/// A template with a validated, closed set of placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    fields: BTreeSet<String>,
}

impl PromptTemplate {
    /// Build a template, validating that its placeholders are exactly
    /// `fields` - no extras, no missing, no unclosed delimiters.
    pub fn new(template: impl Into<String>, fields: &[&str]) -> Result<Self> {
        let template = template.into();
        let found = extract_placeholders(&template)?;
        let declared: BTreeSet<String> = fields.iter().map(|f| f.to_string()).collect();

        if found != declared {
            let missing: Vec<_> = declared.difference(&found).cloned().collect();
            let extra: Vec<_> = found.difference(&declared).cloned().collect();
            return Err(CoreError::Config(format!(
                "Template/field drift: missing from template {missing:?}, unknown in template {extra:?}"
            )));
        }

        Ok(Self {
            template,
            fields: declared,
        })
    }

    /// Field names this template expects.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Substitute every placeholder exactly once, in a single pass:
    /// substituted values are never re-scanned, so a value containing
    /// `{{...}}` cannot trigger a second-order substitution.
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String> {
        for field in &self.fields {
            if !values.contains_key(field.as_str()) {
                return Err(CoreError::Config(format!(
                    "No value supplied for template field '{field}'"
                )));
            }
        }

        let mut rendered = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find("{{") {
            rendered.push_str(&rest[..start]);
            // Validated at construction: every "{{" has a matching "}}".
            let end = rest[start..].find("}}").map(|o| start + o + 2).unwrap_or(rest.len());
            let key = &rest[start + 2..end - 2];
            if let Some(value) = values.get(key) {
                rendered.push_str(value);
            }
            rest = &rest[end..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

fn extract_placeholders(template: &str) -> Result<BTreeSet<String>> {
    let mut found = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let Some(end_offset) = rest[start..].find("}}") else {
            return Err(CoreError::Config(
                "Template has an unclosed '{{' placeholder".to_string(),
            ));
        };
        found.insert(rest[start + 2..start + end_offset].to_string());
        rest = &rest[start + end_offset + 2..];
    }
    Ok(found)
}
