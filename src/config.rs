//! Resolver configuration.
//!
//! Configuration is loaded from environment variables following the 12-factor app pattern.

use crate::constants::{DEFAULT_ENVIRONMENT, DEFAULT_PREFIX, DEFAULT_TRIGGER_FIELD};
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};

/// What a catalog build does with a section that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScanMode {
    /// The first failing section aborts the build.
    #[default]
    Strict,

    /// Failing sections are logged and left out of the catalog.
    Lenient,
}

/// Tunables of the section resolution pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Section name prefix marking database sections
    pub prefix: String,

    /// Candidate dialect fields, in priority order
    pub trigger_fields: Vec<String>,

    /// Return failing checks as errors instead of `false`
    pub raise_errors: bool,

    /// Catalog build behaviour for failing sections
    pub scan_mode: ScanMode,

    /// Emit `:port` in built connection URLs
    pub include_port: bool,

    /// Environment used when no server-like section names one
    pub default_environment: String,

    /// Check that network hostnames resolve during validation
    pub resolve_hosts: bool,
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DBSECTION_PREFIX`: Database section prefix (default: db)
    /// - `DBSECTION_TRIGGER_FIELDS`: Comma separated dialect fields (default: dialect)
    /// - `DBSECTION_RAISE_ERRORS`: Raise on failed checks (default: true)
    /// - `DBSECTION_SCAN_MODE`: strict or lenient (default: strict)
    /// - `DBSECTION_INCLUDE_PORT`: Put the port into built URLs (default: false)
    /// - `DBSECTION_DEFAULT_ENVIRONMENT`: Fallback environment (default: dev)
    /// - `DBSECTION_RESOLVE_HOSTS`: Resolve hostnames while validating (default: false)
    pub fn from_env() -> Result<Self, ResolveError> {
        let defaults = Self::default();

        let prefix = std::env::var("DBSECTION_PREFIX").unwrap_or(defaults.prefix);

        let trigger_fields = std::env::var("DBSECTION_TRIGGER_FIELDS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or(defaults.trigger_fields);

        let raise_errors = std::env::var("DBSECTION_RAISE_ERRORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(defaults.raise_errors);

        let scan_mode = match std::env::var("DBSECTION_SCAN_MODE")
            .ok()
            .map(|m| m.to_lowercase())
            .as_deref()
        {
            None | Some("strict") => ScanMode::Strict,
            Some("lenient") | Some("skip") => ScanMode::Lenient,
            Some(other) => {
                return Err(ResolveError::config(format!(
                    "DBSECTION_SCAN_MODE must be 'strict' or 'lenient', got '{}'",
                    other
                )))
            }
        };

        let include_port = std::env::var("DBSECTION_INCLUDE_PORT")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(defaults.include_port);

        let default_environment =
            std::env::var("DBSECTION_DEFAULT_ENVIRONMENT").unwrap_or(defaults.default_environment);

        let resolve_hosts = std::env::var("DBSECTION_RESOLVE_HOSTS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(defaults.resolve_hosts);

        let config = ResolverConfig {
            prefix,
            trigger_fields,
            raise_errors,
            scan_mode,
            include_port,
            default_environment,
            resolve_hosts,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.prefix.trim().is_empty() {
            return Err(ResolveError::config("database section prefix cannot be empty"));
        }
        if self.trigger_fields.is_empty() {
            return Err(ResolveError::config("at least one dialect trigger field is required"));
        }
        if self.default_environment.trim().is_empty() {
            return Err(ResolveError::config("default environment cannot be empty"));
        }
        Ok(())
    }

    /// Collect failing sections instead of aborting the build.
    pub fn lenient(mut self) -> Self {
        self.scan_mode = ScanMode::Lenient;
        self
    }

    pub fn with_include_port(mut self, include_port: bool) -> Self {
        self.include_port = include_port;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            trigger_fields: vec![DEFAULT_TRIGGER_FIELD.to_string()],
            raise_errors: true,
            scan_mode: ScanMode::Strict,
            include_port: false,
            default_environment: DEFAULT_ENVIRONMENT.to_string(),
            resolve_hosts: false,
        }
    }
}
