//! Centralized constants for section resolution.
//!
//! This module contains the field names, default values, and token tables used
//! throughout the pipeline, making them easy to find, understand, and modify.

use std::ops::RangeInclusive;

// =============================================================================
// Classification Constants
// =============================================================================

/// Default prefix that marks a section as a database section.
pub const DEFAULT_PREFIX: &str = "db";

/// Default field holding the dialect of a database section.
pub const DEFAULT_TRIGGER_FIELD: &str = "dialect";

/// Field that, when present, excludes a section from processing.
pub const IGNORE_FIELD: &str = "ignore";

/// Values of the ignore field that keep a section active.
pub const IGNORE_NEGATIVE_VALUES: &[&str] = &["false", "no", "0"];

// =============================================================================
// Field Names
// =============================================================================

/// Default field checked by the host validator.
pub const HOST_FIELD: &str = "host";

/// Default field checked by the port validator.
pub const PORT_FIELD: &str = "port";

/// Default field checked by the path validator.
pub const PATH_FIELD: &str = "path";

pub const DRIVER_FIELD: &str = "driver";
pub const FILENAME_FIELD: &str = "filename";
pub const HOSTNAME_FIELD: &str = "hostname";
pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";
pub const DATABASE_FIELD: &str = "database";
pub const SCHEMA_FIELD: &str = "schema";

/// Field naming the logical group of a database section.
pub const GROUP_FIELD: &str = "group";

/// Field naming the environment of a database section.
pub const ENVIRONMENT_FIELD: &str = "environment";

/// Fields stripped from a [`crate::lookup::DatabaseHandle`]'s attributes.
pub const CREDENTIAL_FIELDS: &[&str] = &["username", "user", "password"];

// =============================================================================
// Network Constants
// =============================================================================

/// Valid TCP port numbers.
pub const PORT_RANGE: RangeInclusive<u32> = 1..=65535;

/// Port paired with a hostname when probing whether it resolves.
pub const HOST_PROBE_PORT: u16 = 80;

// =============================================================================
// Environment Constants
// =============================================================================

/// Sections searched, in order, for the active environment.
pub const ENVIRONMENT_SEARCH_SECTIONS: &[&str] = &["server", "basic", "default", "system", "main"];

/// Field names that hold the active environment inside a search section.
pub const ENVIRONMENT_FIELD_NAMES: &[&str] = &["environment", "env"];

/// Environment used when no search section names one.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

// =============================================================================
// Connection Manager Constants
// =============================================================================

/// Key of the connection and session created on first access.
pub const DEFAULT_KEY: &str = "__default__";
