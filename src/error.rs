//! Error types for section resolution.
//!
//! Every failure belongs to one of a small set of kinds: something required is
//! missing ([`ErrorKind::NotFound`]), something present breaks a rule
//! ([`ErrorKind::Invalid`]), or the resolver itself is misconfigured.

use crate::constants::PORT_RANGE;
use thiserror::Error;

/// Broad classification of a [`ResolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A section or field is absent where required.
    NotFound,
    /// A field is present but fails a domain rule.
    Invalid,
    /// The resolver configuration is unusable.
    Config,
    /// A section document could not be read or parsed.
    Source,
    /// The connection provider failed to create a handle.
    Provider,
}

/// Errors raised while validating and resolving database sections.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Section missing from the configuration
    #[error("The config section of '{section}' does not exist")]
    SectionNotFound { section: String },

    /// Field missing from a section
    #[error("In the config section '{section}' the field of '{field}' does not exist")]
    FieldNotFound { section: String, field: String },

    /// Field present but empty
    #[error("In the config section '{section}' the '{field}' is not set or is empty")]
    EmptyValue { section: String, field: String },

    /// Dialect outside the supported set
    #[error(
        "In the section '{section}', the '{field}' of: '{value}' is not valid.  Please choose from the following: {accepted}"
    )]
    InvalidDialect {
        section: String,
        field: String,
        value: String,
        accepted: String,
    },

    /// Port that is not an integer in range
    #[error(
        "In the config section '{section}' the '{field}' of '{value}' is not a valid port number.  The value of '{field}' should be an integer between {min} and {max}",
        min = PORT_RANGE.start(),
        max = PORT_RANGE.end()
    )]
    InvalidPort {
        section: String,
        field: String,
        value: String,
    },

    /// Hostname that does not resolve
    #[error("In the config section '{section}' the '{field}' of '{value}' is not valid.  Unable to resolve.")]
    UnresolvableHost {
        section: String,
        field: String,
        value: String,
    },

    /// Several required fields failed at once
    #[error("Unable to load the '{section}' database: {}", join_failures(.failures))]
    Incomplete {
        section: String,
        failures: Vec<ResolveError>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Section document could not be read or parsed
    #[error("Unable to read sections: {message}")]
    Source {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Connection provider failure
    #[error("Connection provider error: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn join_failures(failures: &[ResolveError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ResolveError {
    /// Create a missing-section error.
    pub fn section_not_found(section: impl Into<String>) -> Self {
        Self::SectionNotFound {
            section: section.into(),
        }
    }

    /// Create a missing-field error.
    pub fn field_not_found(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            section: section.into(),
            field: field.into(),
        }
    }

    /// Create an empty-value error.
    pub fn empty_value(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self::EmptyValue {
            section: section.into(),
            field: field.into(),
        }
    }

    /// Create an invalid-dialect error listing the accepted dialects.
    pub fn invalid_dialect(
        section: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        accepted: impl Into<String>,
    ) -> Self {
        Self::InvalidDialect {
            section: section.into(),
            field: field.into(),
            value: value.into(),
            accepted: accepted.into(),
        }
    }

    /// Create an invalid-port error.
    pub fn invalid_port(
        section: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidPort {
            section: section.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an unresolvable-host error.
    pub fn unresolvable_host(
        section: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::UnresolvableHost {
            section: section.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a source error with the underlying cause.
    pub fn source_with(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Source {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a connection provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a connection provider error with the underlying cause.
    pub fn provider_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Fold the failures of one section into a single error.
    ///
    /// Returns `None` when there is nothing to report.
    pub fn collect(section: &str, mut failures: Vec<ResolveError>) -> Option<Self> {
        match failures.len() {
            0 => None,
            1 => failures.pop(),
            _ => Some(Self::Incomplete {
                section: section.to_string(),
                failures,
            }),
        }
    }

    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SectionNotFound { .. } | Self::FieldNotFound { .. } => ErrorKind::NotFound,
            Self::EmptyValue { .. }
            | Self::InvalidDialect { .. }
            | Self::InvalidPort { .. }
            | Self::UnresolvableHost { .. } => ErrorKind::Invalid,
            Self::Incomplete { failures, .. } => failures
                .first()
                .map(ResolveError::kind)
                .unwrap_or(ErrorKind::Invalid),
            Self::Config(_) => ErrorKind::Config,
            Self::Source { .. } => ErrorKind::Source,
            Self::Provider { .. } => ErrorKind::Provider,
        }
    }

    /// Name of the section the error refers to, if any.
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::SectionNotFound { section }
            | Self::FieldNotFound { section, .. }
            | Self::EmptyValue { section, .. }
            | Self::InvalidDialect { section, .. }
            | Self::InvalidPort { section, .. }
            | Self::UnresolvableHost { section, .. }
            | Self::Incomplete { section, .. } => Some(section),
            Self::Config(_) | Self::Source { .. } | Self::Provider { .. } => None,
        }
    }

    /// Get a user-friendly suggestion for how to fix this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::SectionNotFound { .. } => Some("Check the section name and the loaded config files"),
            Self::FieldNotFound { .. } | Self::EmptyValue { .. } | Self::Incomplete { .. } => {
                Some("Add the missing fields to the section or mark it with 'ignore = true'")
            }
            Self::InvalidDialect { .. } => Some("Use one of the supported dialect names"),
            Self::InvalidPort { .. } => Some("Use an integer port between 1 and 65535"),
            Self::UnresolvableHost { .. } => Some("Check the hostname and DNS configuration"),
            Self::Config(_) => Some("Check your environment variables and configuration"),
            Self::Provider { .. } => Some("Check the connection URL and that the database is reachable"),
            Self::Source { .. } => None,
        }
    }
}
