//! Database dialects and the connection families they belong to.

use crate::constants::{
    DATABASE_FIELD, FILENAME_FIELD, HOSTNAME_FIELD, PASSWORD_FIELD, PORT_FIELD, SCHEMA_FIELD,
    USERNAME_FIELD,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Access,
    Drizzle,
    Firebird,
    Informix,
    Maxdb,
    Mysql,
    Mssql,
    Oracle,
    Postgresql,
    Sqlite,
    Sybase,
}

impl Dialect {
    /// Every supported dialect, in alphabetical order.
    pub const ALL: [Dialect; 11] = [
        Dialect::Access,
        Dialect::Drizzle,
        Dialect::Firebird,
        Dialect::Informix,
        Dialect::Maxdb,
        Dialect::Mysql,
        Dialect::Mssql,
        Dialect::Oracle,
        Dialect::Postgresql,
        Dialect::Sqlite,
        Dialect::Sybase,
    ];

    /// Lower-case name as written in config sections and URLs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Drizzle => "drizzle",
            Self::Firebird => "firebird",
            Self::Informix => "informix",
            Self::Maxdb => "maxdb",
            Self::Mysql => "mysql",
            Self::Mssql => "mssql",
            Self::Oracle => "oracle",
            Self::Postgresql => "postgresql",
            Self::Sqlite => "sqlite",
            Self::Sybase => "sybase",
        }
    }

    /// The connection family this dialect belongs to.
    #[must_use]
    pub fn family(&self) -> DialectFamily {
        match self {
            Self::Sqlite | Self::Access => DialectFamily::File,
            Self::Mysql => DialectFamily::NetworkNoSchema,
            Self::Drizzle
            | Self::Firebird
            | Self::Informix
            | Self::Maxdb
            | Self::Mssql
            | Self::Oracle
            | Self::Postgresql
            | Self::Sybase => DialectFamily::NetworkWithSchema,
        }
    }

    /// Comma separated list of accepted names, for error messages.
    pub fn accepted() -> String {
        Self::ALL
            .iter()
            .map(Dialect::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a dialect fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDialectError(String);

impl fmt::Display for ParseDialectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dialect: '{}'", self.0)
    }
}

impl std::error::Error for ParseDialectError {}

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| ParseDialectError(s.to_string()))
    }
}

/// Group of dialects sharing the same connection fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialectFamily {
    /// Embedded databases addressed by a file.
    File,
    /// Network databases whose sections carry a schema.
    NetworkWithSchema,
    /// Network databases without a schema field.
    NetworkNoSchema,
}

impl DialectFamily {
    /// Fields a section of this family must populate.
    #[must_use]
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::File => &[FILENAME_FIELD],
            Self::NetworkWithSchema => &[
                HOSTNAME_FIELD,
                PORT_FIELD,
                USERNAME_FIELD,
                PASSWORD_FIELD,
                DATABASE_FIELD,
                SCHEMA_FIELD,
            ],
            Self::NetworkNoSchema => &[
                HOSTNAME_FIELD,
                PORT_FIELD,
                USERNAME_FIELD,
                PASSWORD_FIELD,
                DATABASE_FIELD,
            ],
        }
    }

    /// Whether sections of this family are reached over the network.
    #[must_use]
    pub fn is_network(&self) -> bool {
        !matches!(self, Self::File)
    }

    /// Dialects belonging to this family.
    pub fn dialects(&self) -> impl Iterator<Item = Dialect> + '_ {
        Dialect::ALL.into_iter().filter(move |d| d.family() == *self)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::NetworkWithSchema => "network",
            Self::NetworkNoSchema => "network (no schema)",
        }
    }
}

impl fmt::Display for DialectFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
