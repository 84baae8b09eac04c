//! # dbsection
//!
//! Resolve database connection definitions out of layered configuration
//! sections.
//!
//! This crate provides:
//! - **Checks**: section, field, and value existence checks with raise or quiet reporting
//! - **Validators**: dialect, host, port, and path rules on top of those checks
//! - **Classification**: which sections describe databases, honoring `ignore` flags
//! - **Catalog**: every valid database section, indexed by name and by group/environment
//! - **Lookup**: `(name, environment)` requests resolved to sections, URLs, and connection managers
//!
//! ## Pipeline
//!
//! Raw sections are classified, validated against the field rules of their
//! dialect family, and cataloged once. Lookups then resolve against the
//! immutable catalog and build connection URLs on demand.

pub mod attributes;
pub mod catalog;
pub mod checks;
pub mod classify;
pub mod config;
pub mod constants;
pub mod dialect;
pub mod error;
pub mod logger;
pub mod lookup;
pub mod manager;
pub mod sections;
pub mod url;
pub mod validator;

pub use catalog::{Catalog, CatalogBuilder};
pub use checks::Reporting;
pub use config::{ResolverConfig, ScanMode};
pub use dialect::{Dialect, DialectFamily};
pub use error::{ErrorKind, ResolveError};
pub use lookup::{DatabaseHandle, DatabaseLookup};
pub use manager::{ConnectionManager, ConnectionProvider};
pub use sections::{Section, Sections};
