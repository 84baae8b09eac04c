//! Diagnostic sink for checks that fail quietly.
//!
//! Checks run in quiet mode report their failures here instead of returning
//! an error. The default sink forwards to `tracing`.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Debug,
    Critical,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Receiver of diagnostic messages.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Shared logger handle.
pub type SharedLogger = Arc<dyn Logger>;

/// Logger that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Critical => error!("{}", message),
        }
    }
}

/// Logger that keeps every message, for inspection in tests.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: parking_lot::Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded messages.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().clone()
    }

    /// Most recent message logged at `level`.
    pub fn last(&self, level: LogLevel) -> Option<String> {
        self.entries
            .lock()
            .iter()
            .rev()
            .find(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.lock().push((level, message.to_string()));
    }
}
