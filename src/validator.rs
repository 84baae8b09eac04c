//! Connection validation per dialect family.
//!
//! A section's dialect maps to exactly one [`DialectFamily`], and the family
//! fixes the fields the section must populate. Validation therefore dispatches
//! straight to the family instead of trying validators one after another.
//!
//! Required fields are all evaluated before deciding: in raise mode every
//! failure is collected, a single failure is returned as-is, and several come
//! back together as [`ResolveError::Incomplete`].

use crate::attributes::{HostResolver, HostValidator, PortValidator};
use crate::checks::{FieldChecks, Reporting};
use crate::classify::{SectionClassifier, TriggerFinder};
use crate::config::ResolverConfig;
use crate::constants::HOSTNAME_FIELD;
use crate::dialect::{Dialect, DialectFamily};
use crate::error::ResolveError;
use crate::sections::Sections;
use std::sync::Arc;
use tracing::debug;

/// Outcome of validating one database section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validated {
    pub dialect: Dialect,
    pub family: DialectFamily,
}

/// Validates database sections against their family's field rules.
#[derive(Debug, Clone)]
pub struct ConnectionValidator<'a> {
    sections: &'a Sections,
    triggers: TriggerFinder,
    classifier: SectionClassifier<'a>,
    checks: FieldChecks<'a>,
    ports: PortValidator<'a>,
    hosts: Option<HostValidator<'a>>,
}

impl<'a> ConnectionValidator<'a> {
    pub fn new(
        sections: &'a Sections,
        triggers: TriggerFinder,
        prefix: impl Into<String>,
        reporting: Reporting,
    ) -> Self {
        Self {
            sections,
            triggers,
            classifier: SectionClassifier::new(sections, prefix, &reporting),
            ports: PortValidator::new(sections, &reporting),
            checks: FieldChecks::new(sections, reporting),
            hosts: None,
        }
    }

    pub fn from_config(sections: &'a Sections, config: &ResolverConfig, reporting: Reporting) -> Self {
        Self::new(
            sections,
            TriggerFinder::from_config(config),
            config.prefix.clone(),
            reporting,
        )
    }

    /// Also require network hostnames to resolve.
    pub fn with_host_resolver(mut self, resolver: Arc<dyn HostResolver>) -> Self {
        self.hosts = Some(HostValidator::new(
            self.sections,
            self.checks.reporting(),
            resolver,
        ));
        self
    }

    /// Validate `section` against whichever family its dialect belongs to.
    ///
    /// `Ok(None)` means the section is not a usable database section: not
    /// prefixed, ignored, or (in quiet mode) failing a check.
    pub fn validate(&self, section: &str) -> Result<Option<Validated>, ResolveError> {
        let Some(dialect) = self.classified_dialect(section)? else {
            return Ok(None);
        };
        let family = dialect.family();

        if self.check_family(section, family)? {
            debug!("Section '{}' validated as {} ({})", section, dialect, family);
            Ok(Some(Validated { dialect, family }))
        } else {
            Ok(None)
        }
    }

    pub fn is_valid(&self, section: &str) -> Result<bool, ResolveError> {
        Ok(self.validate(section)?.is_some())
    }

    /// Validate `section` only if its dialect belongs to `family`.
    ///
    /// A section of another family answers `Ok(false)` without error.
    pub fn validate_family(&self, section: &str, family: DialectFamily) -> Result<bool, ResolveError> {
        match self.classified_dialect(section)? {
            Some(dialect) if dialect.family() == family => self.check_family(section, family),
            _ => Ok(false),
        }
    }

    fn classified_dialect(&self, section: &str) -> Result<Option<Dialect>, ResolveError> {
        let trigger = self.triggers.find(self.sections, section);
        if !self.classifier.is_database_section(section, Some(trigger))? {
            return Ok(None);
        }

        Ok(self
            .sections
            .field(section, trigger)
            .and_then(|v| v.parse::<Dialect>().ok()))
    }

    fn check_family(&self, section: &str, family: DialectFamily) -> Result<bool, ResolveError> {
        let mut valid = true;
        let mut failures = Vec::new();

        for field in family.required_fields() {
            match self.checks.validate_field(section, field) {
                Ok(true) => {}
                Ok(false) => valid = false,
                Err(e) => {
                    valid = false;
                    failures.push(e);
                }
            }
        }

        if let Some(err) = ResolveError::collect(section, failures) {
            return Err(err);
        }
        if !valid {
            return Ok(false);
        }

        if family.is_network() {
            if !self.ports.validate(section, None)? {
                return Ok(false);
            }
            if let Some(hosts) = &self.hosts {
                return hosts.validate(section, Some(HOSTNAME_FIELD));
            }
        }
        Ok(true)
    }
}
