//! Attribute validators built on the field existence checks.
//!
//! Each validator checks a default field (`dialect`, `host`, `port`, `path`)
//! unless a different field name is passed, so the same rule can cover
//! differently named fields across config layouts.

use crate::checks::{FieldChecks, Reporting};
use crate::constants::{DEFAULT_TRIGGER_FIELD, HOST_FIELD, HOST_PROBE_PORT, PATH_FIELD, PORT_FIELD, PORT_RANGE};
use crate::dialect::Dialect;
use crate::error::ResolveError;
use crate::logger::LogLevel;
use crate::sections::Sections;
use std::collections::HashSet;
use std::net::ToSocketAddrs;
use std::sync::Arc;

/// Answers whether a hostname resolves to at least one address.
pub trait HostResolver: Send + Sync {
    fn resolves(&self, host: &str) -> bool;
}

/// Resolver backed by the operating system's name lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn resolves(&self, host: &str) -> bool {
        (host, HOST_PROBE_PORT)
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false)
    }
}

/// Resolver that knows a fixed set of names.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    known: HashSet<String>,
}

impl StaticResolver {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: hosts.into_iter().map(Into::into).collect(),
        }
    }
}

impl HostResolver for StaticResolver {
    fn resolves(&self, host: &str) -> bool {
        self.known.contains(host)
    }
}

fn critical_checks<'a>(sections: &'a Sections, reporting: &Reporting) -> FieldChecks<'a> {
    FieldChecks::new(sections, reporting.at_level(LogLevel::Critical))
}

/// Validates that a field names a supported dialect.
#[derive(Debug, Clone)]
pub struct DialectValidator<'a> {
    checks: FieldChecks<'a>,
}

impl<'a> DialectValidator<'a> {
    pub fn new(sections: &'a Sections, reporting: &Reporting) -> Self {
        Self {
            checks: critical_checks(sections, reporting),
        }
    }

    pub fn validate(&self, section: &str, field: Option<&str>) -> Result<bool, ResolveError> {
        Ok(self.dialect(section, field)?.is_some())
    }

    /// The parsed dialect, or `None` when the check failed quietly.
    pub fn dialect(&self, section: &str, field: Option<&str>) -> Result<Option<Dialect>, ResolveError> {
        let field = field.unwrap_or(DEFAULT_TRIGGER_FIELD);
        if !self.checks.validate_field(section, field)? {
            return Ok(None);
        }

        let value = self.checks.sections().field(section, field).unwrap_or_default();
        match value.parse::<Dialect>() {
            Ok(dialect) => Ok(Some(dialect)),
            Err(_) => {
                let err = ResolveError::invalid_dialect(section, field, value, Dialect::accepted());
                self.checks.reporting().fail(err).map(|_| None)
            }
        }
    }
}

/// Validates that a field holds a resolvable hostname.
#[derive(Clone)]
pub struct HostValidator<'a> {
    checks: FieldChecks<'a>,
    resolver: Arc<dyn HostResolver>,
}

impl<'a> HostValidator<'a> {
    pub fn new(sections: &'a Sections, reporting: &Reporting, resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            checks: critical_checks(sections, reporting),
            resolver,
        }
    }

    pub fn validate(&self, section: &str, field: Option<&str>) -> Result<bool, ResolveError> {
        let field = field.unwrap_or(HOST_FIELD);
        if !self.checks.validate_field(section, field)? {
            return Ok(false);
        }

        let value = self.checks.sections().field(section, field).unwrap_or_default();
        if self.resolver.resolves(value) {
            Ok(true)
        } else {
            self.checks
                .reporting()
                .fail(ResolveError::unresolvable_host(section, field, value))
        }
    }
}

impl std::fmt::Debug for HostValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostValidator")
            .field("checks", &self.checks)
            .finish_non_exhaustive()
    }
}

/// Validates that a field holds a port number between 1 and 65535.
#[derive(Debug, Clone)]
pub struct PortValidator<'a> {
    checks: FieldChecks<'a>,
}

impl<'a> PortValidator<'a> {
    pub fn new(sections: &'a Sections, reporting: &Reporting) -> Self {
        Self {
            checks: critical_checks(sections, reporting),
        }
    }

    pub fn validate(&self, section: &str, field: Option<&str>) -> Result<bool, ResolveError> {
        let field = field.unwrap_or(PORT_FIELD);
        if !self.checks.validate_field(section, field)? {
            return Ok(false);
        }

        let value = self.checks.sections().field(section, field).unwrap_or_default();
        match parse_port(value) {
            Some(_) => Ok(true),
            None => self
                .checks
                .reporting()
                .fail(ResolveError::invalid_port(section, field, value)),
        }
    }
}

/// Parse a port number, rejecting anything outside the valid range.
pub fn parse_port(value: &str) -> Option<u16> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|p| *p >= i64::from(*PORT_RANGE.start()) && *p <= i64::from(*PORT_RANGE.end()))
        .and_then(|p| u16::try_from(p).ok())
}

/// Validates that a path field is present and populated.
#[derive(Debug, Clone)]
pub struct PathValidator<'a> {
    checks: FieldChecks<'a>,
}

impl<'a> PathValidator<'a> {
    pub fn new(sections: &'a Sections, reporting: &Reporting) -> Self {
        Self {
            checks: critical_checks(sections, reporting),
        }
    }

    pub fn validate(&self, section: &str, field: Option<&str>) -> Result<bool, ResolveError> {
        self.checks.validate_field(section, field.unwrap_or(PATH_FIELD))
    }
}
