use std::any::Any;
use std::panic;
use std::sync::Arc;

use log::warn;

use crate::config::LogConfig;
use crate::error::{LogError, Result};
use crate::formatter::{LogFormatter, StackTraceFormatter, ThreadFormatter};
use crate::level::LogLevel;
use crate::printer::{LogPrinter, LogRecord};
use crate::stack::{self, IGNORE_PREFIX};
use crate::value::{join_contents, LogValue};

/// Outcome of a single dispatch.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Printers that accepted the record
    pub printed: usize,
    pub failures: Vec<LogError>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds the message text: optional thread line, optional stack block, body.
pub fn compose_message(config: &LogConfig, contents: &[LogValue]) -> Result<String> {
    let mut message = String::new();
    if config.include_thread {
        if let Some(thread_info) = ThreadFormatter.format(&std::thread::current()) {
            message.push_str(&thread_info);
            message.push('\n');
        }
    }
    if config.stack_trace_depth > 0 {
        let frames = stack::cropped_real_stack(&stack::capture(), IGNORE_PREFIX, config.stack_trace_depth);
        if let Some(stack_trace) = StackTraceFormatter.format(frames.as_slice()) {
            message.push_str(&stack_trace);
            message.push('\n');
        }
    }
    message.push_str(&parse_body(config, contents)?);
    Ok(message)
}

fn parse_body(config: &LogConfig, contents: &[LogValue]) -> Result<String> {
    match &config.json_parser {
        Some(parser) => parser.to_json(contents),
        None => Ok(join_contents(contents)),
    }
}

/// Formats `contents` and hands the record to every printer in order.
///
/// `config.printers` takes precedence over `default_printers`. A failing or
/// panicking printer is reported in the returned `DispatchReport` and does not
/// stop the remaining printers. Only a body serialization failure returns
/// `Err`, before any printer runs.
pub fn dispatch(
    config: &LogConfig,
    level: LogLevel,
    tag: &str,
    contents: &[LogValue],
    default_printers: &[Arc<dyn LogPrinter>],
) -> Result<DispatchReport> {
    let mut report = DispatchReport::default();
    if !config.enable {
        return Ok(report);
    }

    let message = compose_message(config, contents)?;

    let printers = config.printers.as_deref().unwrap_or(default_printers);
    if printers.is_empty() {
        return Ok(report);
    }

    let record = LogRecord::new(level, tag, message);
    for printer in printers {
        let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| printer.print(config, &record)));
        match outcome {
            Ok(Ok(())) => report.printed += 1,
            Ok(Err(e)) => {
                warn!("Printer '{}' failed: {}", printer.name(), e);
                report.failures.push(e);
            }
            Err(panic_err) => {
                let reason = panic_message(panic_err.as_ref());
                warn!("Printer '{}' panicked: {}", printer.name(), reason);
                report.failures.push(LogError::Printer {
                    printer: printer.name().to_string(),
                    reason,
                });
            }
        }
    }
    Ok(report)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked".to_string()
    }
}
