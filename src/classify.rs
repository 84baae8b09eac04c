//! Database section classification.
//!
//! A section is a database section when it exists, its name starts with the
//! configured prefix, it is not ignored, and its trigger field names a valid
//! dialect.
//!
//! The ignore flag defaults to *ignoring*: any `ignore` value other than one
//! of `false`, `no`, or `0` (an empty value included) excludes the section.

use crate::attributes::DialectValidator;
use crate::checks::{FieldChecks, Reporting};
use crate::config::ResolverConfig;
use crate::constants::{DEFAULT_PREFIX, DEFAULT_TRIGGER_FIELD, IGNORE_FIELD, IGNORE_NEGATIVE_VALUES};
use crate::error::ResolveError;
use crate::logger::LogLevel;
use crate::sections::Sections;
use tracing::debug;

/// Picks the field that carries a section's dialect.
#[derive(Debug, Clone)]
pub struct TriggerFinder {
    fields: Vec<String>,
}

impl TriggerFinder {
    /// Use `fields` as candidate trigger names, in priority order.
    ///
    /// An empty list falls back to the default `dialect` field.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            fields.push(DEFAULT_TRIGGER_FIELD.to_string());
        }
        Self { fields }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.trigger_fields.iter().cloned())
    }

    /// The first candidate present in the section, else the primary candidate.
    pub fn find<'f>(&'f self, sections: &Sections, section: &str) -> &'f str {
        sections
            .get(section)
            .and_then(|s| self.fields.iter().find(|f| s.contains(f)))
            .unwrap_or(&self.fields[0])
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Default for TriggerFinder {
    fn default() -> Self {
        Self::new([DEFAULT_TRIGGER_FIELD])
    }
}

/// Decides whether a section describes a database connection.
#[derive(Debug, Clone)]
pub struct SectionClassifier<'a> {
    sections: &'a Sections,
    prefix: String,
    checks: FieldChecks<'a>,
    dialects: DialectValidator<'a>,
}

impl<'a> SectionClassifier<'a> {
    pub fn new(sections: &'a Sections, prefix: impl Into<String>, reporting: &Reporting) -> Self {
        Self {
            sections,
            prefix: prefix.into(),
            checks: FieldChecks::new(sections, reporting.clone()),
            dialects: DialectValidator::new(sections, reporting),
        }
    }

    /// Classifier with the default `db` prefix that raises on failures.
    pub fn with_defaults(sections: &'a Sections) -> Self {
        Self::new(sections, DEFAULT_PREFIX, &Reporting::raising())
    }

    /// Classify `section`, reading its dialect from `trigger`
    /// (`dialect` when `None`).
    pub fn is_database_section(&self, section: &str, trigger: Option<&str>) -> Result<bool, ResolveError> {
        if !self.checks.section_exists(section)? {
            return Ok(false);
        }
        if !section.starts_with(self.prefix.as_str()) {
            return Ok(false);
        }
        if self.should_ignore(section) {
            return Ok(false);
        }
        self.dialects.validate(section, trigger)
    }

    /// Whether the section's ignore flag excludes it.
    pub fn should_ignore(&self, section: &str) -> bool {
        let Some(value) = self.sections.field(section, IGNORE_FIELD) else {
            return false;
        };

        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() || !IGNORE_NEGATIVE_VALUES.contains(&normalized.as_str()) {
            let msg = format!("The config section '{}' has been ignored", section);
            debug!("{}", msg);
            self.checks.reporting().note(LogLevel::Debug, &msg);
            return true;
        }
        false
    }
}
