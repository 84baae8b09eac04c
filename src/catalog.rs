//! Catalog of every valid database section.
//!
//! The catalog indexes sections two ways: flat by section name, and by
//! `group` then `environment` for sections that declare both. It is built at
//! most once per [`CatalogBuilder`] and never changes afterwards.

use crate::config::ScanMode;
use crate::constants::{ENVIRONMENT_FIELD, GROUP_FIELD};
use crate::dialect::DialectFamily;
use crate::error::ResolveError;
use crate::sections::{Section, Sections};
use crate::validator::ConnectionValidator;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A section left out of a lenient catalog build.
#[derive(Debug, Clone)]
pub struct SkippedSection {
    pub name: String,
    pub reason: String,
}

/// Validated database sections.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    names: IndexMap<String, Section>,
    groups: IndexMap<String, IndexMap<String, String>>,
    families: IndexMap<String, DialectFamily>,
    skipped: Vec<SkippedSection>,
}

impl Catalog {
    /// Section data of every cataloged section, keyed by section name.
    pub fn names(&self) -> &IndexMap<String, Section> {
        &self.names
    }

    /// `group -> environment -> section name`.
    pub fn groups(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.groups
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.names.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Section name registered for `group` in `environment`.
    pub fn group_member(&self, group: &str, environment: &str) -> Option<&str> {
        self.groups
            .get(group)
            .and_then(|envs| envs.get(environment))
            .map(String::as_str)
    }

    /// Family that validated the section.
    pub fn family(&self, name: &str) -> Option<DialectFamily> {
        self.families.get(name).copied()
    }

    /// Sections dropped by a lenient build.
    pub fn skipped(&self) -> &[SkippedSection] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn record(&mut self, name: &str, section: &Section, family: DialectFamily) {
        let group = section.get_populated(GROUP_FIELD);
        let environment = section.get_populated(ENVIRONMENT_FIELD);
        if let (Some(group), Some(environment)) = (group, environment) {
            if let Some(previous) = self
                .groups
                .entry(group.to_string())
                .or_default()
                .insert(environment.to_string(), name.to_string())
            {
                debug!(
                    "Section '{}' replaces '{}' for group '{}' in '{}'",
                    name, previous, group, environment
                );
            }
        }

        self.names.insert(name.to_string(), section.clone());
        self.families.insert(name.to_string(), family);
    }
}

/// Builds and memoizes the [`Catalog`] for one set of sections.
#[derive(Debug)]
pub struct CatalogBuilder<'a> {
    sections: &'a Sections,
    validator: ConnectionValidator<'a>,
    mode: ScanMode,
    cache: OnceCell<Arc<Catalog>>,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(sections: &'a Sections, validator: ConnectionValidator<'a>, mode: ScanMode) -> Self {
        Self {
            sections,
            validator,
            mode,
            cache: OnceCell::new(),
        }
    }

    /// Build the catalog on first call; later calls return the same catalog.
    ///
    /// Concurrent first calls build it once. A failed strict build leaves
    /// nothing cached, so the next call scans again.
    pub fn build(&self) -> Result<Arc<Catalog>, ResolveError> {
        self.cache.get_or_try_init(|| self.scan().map(Arc::new)).cloned()
    }

    /// The catalog, if it has been built.
    pub fn get(&self) -> Option<Arc<Catalog>> {
        self.cache.get().cloned()
    }

    fn scan(&self) -> Result<Catalog, ResolveError> {
        let mut catalog = Catalog::default();

        for (name, section) in self.sections.iter() {
            match self.validator.validate(name) {
                Ok(Some(validated)) => catalog.record(name, section, validated.family),
                Ok(None) => {}
                Err(e) if self.mode == ScanMode::Lenient => {
                    warn!("Skipping section '{}': {}", name, e);
                    catalog.skipped.push(SkippedSection {
                        name: name.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Cataloged {} database sections in {} groups ({} skipped)",
            catalog.names.len(),
            catalog.groups.len(),
            catalog.skipped.len()
        );
        Ok(catalog)
    }
}
