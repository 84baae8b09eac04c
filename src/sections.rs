//! In-memory configuration sections.
//!
//! Sections arrive already parsed from whatever config files the caller
//! loaded. Several layers can be stacked; a later layer overrides individual
//! fields of an earlier one.

use crate::error::ResolveError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A named group of raw string fields, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section {
    fields: IndexMap<String, String>,
}

impl Section {
    /// Create an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field.into(), value.into())
    }

    /// Raw value of a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of a field when present and not blank.
    pub fn get_populated(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|v| !v.trim().is_empty())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Section {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// All sections of a configuration, keyed by section name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sections {
    sections: IndexMap<String, Section>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style section insertion.
    pub fn with(mut self, name: impl Into<String>, section: Section) -> Self {
        self.sections.insert(name.into(), section);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, section: Section) -> Option<Section> {
        self.sections.insert(name.into(), section)
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Raw value of `field` in section `name`.
    pub fn field(&self, name: &str, field: &str) -> Option<&str> {
        self.get(name).and_then(|s| s.get(field))
    }

    /// Section names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Overlay a later configuration layer onto this one.
    ///
    /// New sections are appended; fields of existing sections are replaced
    /// one by one, keeping the fields the later layer does not mention.
    pub fn layer(&mut self, other: Sections) {
        for (name, section) in other.sections {
            let target = self.sections.entry(name).or_default();
            for (field, value) in section.fields {
                target.fields.insert(field, value);
            }
        }
    }

    /// Fold several layers, earliest first.
    pub fn from_layers(layers: impl IntoIterator<Item = Sections>) -> Self {
        let mut out = Sections::new();
        for layer in layers {
            out.layer(layer);
        }
        out
    }

    /// Parse a JSON document of the form `{"section": {"field": "value"}}`.
    pub fn from_json_str(json: &str) -> Result<Self, ResolveError> {
        serde_json::from_str(json)
            .map_err(|e| ResolveError::source_with("invalid section document", e))
    }

    /// Parse a JSON section document from a reader.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, ResolveError> {
        serde_json::from_reader(reader)
            .map_err(|e| ResolveError::source_with("invalid section document", e))
    }
}

impl<K: Into<String>> FromIterator<(K, Section)> for Sections {
    fn from_iter<I: IntoIterator<Item = (K, Section)>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
