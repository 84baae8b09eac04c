//! Connection URL assembly.
//!
//! URLs follow a fixed field order:
//!
//! ```text
//! dialect[+driver]://[/filename][username][:password][@hostname][:port][/database]
//! ```
//!
//! Absent or blank fields contribute nothing. The port is only written when
//! explicitly enabled, since existing consumers expect portless URLs.

use crate::classify::TriggerFinder;
use crate::config::ResolverConfig;
use crate::constants::{
    DATABASE_FIELD, DRIVER_FIELD, FILENAME_FIELD, HOSTNAME_FIELD, PASSWORD_FIELD, PORT_FIELD,
    USERNAME_FIELD,
};
use crate::error::ResolveError;
use crate::sections::{Section, Sections};

/// Builds connection URLs from validated sections.
#[derive(Debug, Clone)]
pub struct UrlBuilder<'a> {
    sections: &'a Sections,
    triggers: TriggerFinder,
    include_port: bool,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(sections: &'a Sections, triggers: TriggerFinder) -> Self {
        Self {
            sections,
            triggers,
            include_port: false,
        }
    }

    pub fn from_config(sections: &'a Sections, config: &ResolverConfig) -> Self {
        Self::new(sections, TriggerFinder::from_config(config)).with_port(config.include_port)
    }

    /// Write `:port` after the hostname.
    pub fn with_port(mut self, include_port: bool) -> Self {
        self.include_port = include_port;
        self
    }

    /// Build the URL for `section`.
    pub fn build(&self, section: &str) -> Result<String, ResolveError> {
        let data = self
            .sections
            .get(section)
            .ok_or_else(|| ResolveError::section_not_found(section))?;

        let trigger = self.triggers.find(self.sections, section);
        let dialect = data
            .get_populated(trigger)
            .ok_or_else(|| ResolveError::field_not_found(section, trigger))?;

        let mut out = dialect.trim().to_lowercase();
        if let Some(driver) = field(data, DRIVER_FIELD) {
            out.push('+');
            out.push_str(driver);
        }
        out.push_str("://");

        if let Some(filename) = field(data, FILENAME_FIELD) {
            out.push('/');
            out.push_str(filename);
        }
        if let Some(username) = field(data, USERNAME_FIELD) {
            out.push_str(username);
        }
        if let Some(password) = field(data, PASSWORD_FIELD) {
            out.push(':');
            out.push_str(password);
        }
        if let Some(hostname) = field(data, HOSTNAME_FIELD) {
            out.push('@');
            out.push_str(hostname);
        }
        if self.include_port {
            if let Some(port) = field(data, PORT_FIELD) {
                out.push(':');
                out.push_str(port.trim());
            }
        }
        if let Some(database) = field(data, DATABASE_FIELD) {
            out.push('/');
            out.push_str(database);
        }

        Ok(out)
    }
}

fn field<'s>(section: &'s Section, name: &str) -> Option<&'s str> {
    section.get_populated(name)
}
