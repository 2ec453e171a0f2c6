use chrono::{DateTime, Local};

use crate::config::LogConfig;
use crate::error::Result;
use crate::level::LogLevel;

pub mod console;
pub mod view;

pub use console::{ConsolePrinter, LineWriter, LogcatWriter};
pub use view::{ViewLogItem, ViewPrinter};

/// A fully formatted log message, shared by every printer of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub tag: String,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, tag: impl Into<String>, message: impl Into<String>) -> Self {
        LogRecord {
            timestamp: Local::now(),
            level,
            tag: tag.into(),
            message: message.into(),
        }
    }
}

/// Destination for log records. Implement this to add a custom output.
pub trait LogPrinter: Send + Sync {
    /// Short name used when reporting failures.
    fn name(&self) -> &str;

    fn print(&self, config: &LogConfig, record: &LogRecord) -> Result<()>;
}
