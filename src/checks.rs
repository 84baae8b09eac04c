//! Primitive field existence checks.
//!
//! Each check answers `Ok(true)` when it passes. On failure it either returns
//! the error (raise mode, the default) or reports it to the configured logger
//! and answers `Ok(false)` (quiet mode), which lets callers probe sections
//! without aborting.

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::logger::{LogLevel, SharedLogger, TracingLogger};
use crate::sections::Sections;
use std::fmt;
use std::sync::Arc;

/// How a failing check is reported.
#[derive(Clone)]
pub struct Reporting {
    raise_errors: bool,
    logger: Option<SharedLogger>,
    level: LogLevel,
}

impl Reporting {
    /// Failures are returned as errors.
    pub fn raising() -> Self {
        Self {
            raise_errors: true,
            logger: None,
            level: LogLevel::Debug,
        }
    }

    /// Failures answer `Ok(false)`.
    pub fn quiet() -> Self {
        Self {
            raise_errors: false,
            ..Self::raising()
        }
    }

    /// Reporting as configured, logging through `tracing`.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            raise_errors: config.raise_errors,
            logger: Some(Arc::new(TracingLogger)),
            level: LogLevel::Debug,
        }
    }

    /// Send failures to `logger` at `level`, in addition to raising them.
    pub fn with_logger(mut self, logger: SharedLogger, level: LogLevel) -> Self {
        self.logger = Some(logger);
        self.level = level;
        self
    }

    /// Same sink, different severity.
    pub fn at_level(&self, level: LogLevel) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    /// Report a failed check.
    pub(crate) fn fail(&self, err: ResolveError) -> Result<bool, ResolveError> {
        if let Some(logger) = &self.logger {
            logger.log(self.level, &err.to_string());
        }
        if self.raise_errors {
            Err(err)
        } else {
            Ok(false)
        }
    }

    /// Emit a message without failing anything.
    pub(crate) fn note(&self, level: LogLevel, message: &str) {
        if let Some(logger) = &self.logger {
            logger.log(level, message);
        }
    }
}

impl Default for Reporting {
    fn default() -> Self {
        Self::raising()
    }
}

impl fmt::Debug for Reporting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporting")
            .field("raise_errors", &self.raise_errors)
            .field("logger", &self.logger.is_some())
            .field("level", &self.level)
            .finish()
    }
}

/// Section, key, and value checks over one set of sections.
#[derive(Debug, Clone)]
pub struct FieldChecks<'a> {
    sections: &'a Sections,
    reporting: Reporting,
}

impl<'a> FieldChecks<'a> {
    pub fn new(sections: &'a Sections, reporting: Reporting) -> Self {
        Self {
            sections,
            reporting,
        }
    }

    pub fn sections(&self) -> &'a Sections {
        self.sections
    }

    pub fn reporting(&self) -> &Reporting {
        &self.reporting
    }

    /// The section is present.
    pub fn section_exists(&self, section: &str) -> Result<bool, ResolveError> {
        if self.sections.contains(section) {
            Ok(true)
        } else {
            self.reporting.fail(ResolveError::section_not_found(section))
        }
    }

    /// The field is present in the section.
    pub fn key_exists(&self, section: &str, field: &str) -> Result<bool, ResolveError> {
        match self.sections.get(section) {
            Some(s) if s.contains(field) => Ok(true),
            Some(_) => self
                .reporting
                .fail(ResolveError::field_not_found(section, field)),
            None => self.reporting.fail(ResolveError::section_not_found(section)),
        }
    }

    /// The field holds a non-blank value.
    pub fn value_exists(&self, section: &str, field: &str) -> Result<bool, ResolveError> {
        match self.sections.get(section).and_then(|s| s.get_populated(field)) {
            Some(_) => Ok(true),
            None => self.reporting.fail(ResolveError::empty_value(section, field)),
        }
    }

    /// Section, key, and value checks in order, stopping at the first failure.
    pub fn validate_field(&self, section: &str, field: &str) -> Result<bool, ResolveError> {
        Ok(self.section_exists(section)?
            && self.key_exists(section, field)?
            && self.value_exists(section, field)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::logger::MemoryLogger;
    use crate::sections::Section;

    fn sections() -> Sections {
        Sections::new().with("blue", Section::new().with("foo", "bar").with("check", ""))
    }

    #[test]
    fn test_section_exists() {
        let sections = sections();
        let checks = FieldChecks::new(&sections, Reporting::raising());
        assert!(checks.section_exists("blue").unwrap());

        let err = checks.section_exists("iro").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("'iro'"));
    }

    #[test]
    fn test_missing_section_is_logged_and_raised() {
        let sections = sections();
        let log = Arc::new(MemoryLogger::new());
        let reporting = Reporting::raising().with_logger(log.clone(), LogLevel::Critical);
        let checks = FieldChecks::new(&sections, reporting);

        assert!(checks.section_exists("iro").is_err());
        assert!(log.last(LogLevel::Critical).is_some());
    }

    #[test]
    fn test_quiet_mode_returns_false() {
        let sections = sections();
        let log = Arc::new(MemoryLogger::new());
        let reporting = Reporting::quiet().with_logger(log.clone(), LogLevel::Debug);
        let checks = FieldChecks::new(&sections, reporting);

        assert!(!checks.section_exists("iro").unwrap());
        assert!(!checks.key_exists("blue", "iro").unwrap());
        assert!(!checks.value_exists("blue", "check").unwrap());
        assert_eq!(log.entries().len(), 3);
    }

    #[test]
    fn test_key_exists() {
        let sections = sections();
        let checks = FieldChecks::new(&sections, Reporting::raising());
        assert!(checks.key_exists("blue", "foo").unwrap());
        assert!(checks.key_exists("blue", "check").unwrap());

        let err = checks.key_exists("blue", "iro").unwrap_err();
        assert!(matches!(err, ResolveError::FieldNotFound { .. }));
    }

    #[test]
    fn test_value_exists() {
        let sections = sections();
        let checks = FieldChecks::new(&sections, Reporting::raising());
        assert!(checks.value_exists("blue", "foo").unwrap());

        let err = checks.value_exists("blue", "check").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }

    #[test]
    fn test_validate_field_short_circuits() {
        let sections = sections();
        let log = Arc::new(MemoryLogger::new());
        let reporting = Reporting::quiet().with_logger(log.clone(), LogLevel::Debug);
        let checks = FieldChecks::new(&sections, reporting);

        assert!(checks.validate_field("blue", "foo").unwrap());
        assert!(!checks.validate_field("iro", "foo").unwrap());
        // only the section check ran for the missing section
        assert_eq!(log.entries().len(), 1);
    }
}
