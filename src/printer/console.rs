use crate::config::{LogConfig, MAX_LEN};
use crate::error::Result;
use crate::level::LogLevel;

use super::{LogPrinter, LogRecord};

/// Receives the individual lines produced by the console printer.
pub trait LineWriter: Send + Sync {
    fn write_line(&self, level: LogLevel, tag: &str, line: &str) -> Result<()>;
}

/// Forwards lines to the `log` facade. The tag travels as the record's
/// module path, which android_logger uses as the logcat tag when no fixed
/// tag is configured.
pub struct LogcatWriter;

impl LineWriter for LogcatWriter {
    fn write_line(&self, level: LogLevel, tag: &str, line: &str) -> Result<()> {
        log::logger().log(
            &log::Record::builder()
                .level(level.to_log_level())
                .target(tag)
                .module_path(Some(tag))
                .args(format_args!("{}", line))
                .build(),
        );
        Ok(())
    }
}

/// Console printer: splits long messages into `MAX_LEN` character lines.
pub struct ConsolePrinter {
    writer: Box<dyn LineWriter>,
    max_len: usize,
}

impl Default for ConsolePrinter {
    fn default() -> Self {
        ConsolePrinter::new()
    }
}

impl ConsolePrinter {
    pub fn new() -> Self {
        ConsolePrinter::with_writer(Box::new(LogcatWriter))
    }

    pub fn with_writer(writer: Box<dyn LineWriter>) -> Self {
        ConsolePrinter {
            writer,
            max_len: MAX_LEN,
        }
    }
}

impl LogPrinter for ConsolePrinter {
    fn name(&self) -> &str {
        "console"
    }

    fn print(&self, _config: &LogConfig, record: &LogRecord) -> Result<()> {
        for line in split_chunks(&record.message, self.max_len) {
            self.writer.write_line(record.level, &record.tag, line)?;
        }
        Ok(())
    }
}

/// Splits `message` into consecutive pieces of `max_len` characters, the
/// last piece holding the remainder. Boundaries ignore words and newlines.
pub fn split_chunks(message: &str, max_len: usize) -> Vec<&str> {
    if max_len == 0 || message.chars().count() <= max_len {
        return vec![message];
    }
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (index, _) in message.char_indices() {
        if count == max_len {
            chunks.push(&message[start..index]);
            start = index;
            count = 0;
        }
        count += 1;
    }
    if start < message.len() {
        chunks.push(&message[start..]);
    }
    chunks
}
