use thiserror::Error;

/// Errors surfaced by the logging facade.
#[derive(Error, Debug)]
pub enum LogError {
    /// The serde_json parser could not serialize the log contents
    #[error("Failed to serialize log contents: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A custom JSON parser rejected the log contents
    #[error("JSON parser failed: {0}")]
    Parser(String),
    /// The priority does not map to any known log level
    #[error("Unknown log priority: {0}")]
    InvalidLevel(i32),
    /// A printer failed to emit a record
    #[error("Printer '{printer}' failed: {reason}")]
    Printer { printer: String, reason: String },
    /// Settings supplied from the Java side could not be parsed
    #[error("Invalid log settings: {0}")]
    Settings(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LogError>;
