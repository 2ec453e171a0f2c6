use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{LogError, Result};
use crate::printer::LogPrinter;
use crate::value::LogValue;

/// Maximum number of characters per console line.
pub const MAX_LEN: usize = 512;

pub const DEFAULT_GLOBAL_TAG: &str = "HiLog";
pub const DEFAULT_STACK_TRACE_DEPTH: usize = 5;

/// Serializes log contents into the message body, decoupling the facade
/// from any particular JSON library.
pub trait JsonParser: Send + Sync {
    fn to_json(&self, contents: &[LogValue]) -> Result<String>;
}

/// `JsonParser` backed by serde_json. Renders the contents as a JSON array.
pub struct SerdeJsonParser;

impl JsonParser for SerdeJsonParser {
    fn to_json(&self, contents: &[LogValue]) -> Result<String> {
        Ok(serde_json::to_string(contents)?)
    }
}

/// Log formatting and routing options, read-only once built.
#[derive(Clone)]
pub struct LogConfig {
    pub enable: bool,
    pub include_thread: bool,
    /// Number of caller frames to print; 0 disables the stack block
    pub stack_trace_depth: usize,
    pub global_tag: String,
    /// Printers used instead of the manager's list when set
    pub printers: Option<Vec<Arc<dyn LogPrinter>>>,
    pub json_parser: Option<Arc<dyn JsonParser>>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            enable: true,
            include_thread: false,
            stack_trace_depth: DEFAULT_STACK_TRACE_DEPTH,
            global_tag: DEFAULT_GLOBAL_TAG.to_string(),
            printers: None,
            json_parser: None,
        }
    }
}

impl LogConfig {
    pub fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    pub fn with_include_thread(mut self, include_thread: bool) -> Self {
        self.include_thread = include_thread;
        self
    }

    pub fn with_stack_trace_depth(mut self, depth: usize) -> Self {
        self.stack_trace_depth = depth;
        self
    }

    pub fn with_global_tag(mut self, tag: impl Into<String>) -> Self {
        self.global_tag = tag.into();
        self
    }

    pub fn with_printers(mut self, printers: Vec<Arc<dyn LogPrinter>>) -> Self {
        self.printers = Some(printers);
        self
    }

    pub fn with_json_parser(mut self, parser: Arc<dyn JsonParser>) -> Self {
        self.json_parser = Some(parser);
        self
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogConfig")
            .field("enable", &self.enable)
            .field("include_thread", &self.include_thread)
            .field("stack_trace_depth", &self.stack_trace_depth)
            .field("global_tag", &self.global_tag)
            .field("printers", &self.printers.as_ref().map(|p| p.len()))
            .field("json_parser", &self.json_parser.is_some())
            .finish()
    }
}

/// Plain settings as supplied by the Java side, e.g.
/// `{"include_thread": true, "stack_trace_depth": 3, "json_body": true}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub enable: bool,
    pub include_thread: bool,
    pub stack_trace_depth: usize,
    pub global_tag: String,
    pub json_body: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            enable: true,
            include_thread: false,
            stack_trace_depth: DEFAULT_STACK_TRACE_DEPTH,
            global_tag: DEFAULT_GLOBAL_TAG.to_string(),
            json_body: false,
        }
    }
}

impl LogSettings {
    /// An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(LogSettings::default());
        }
        serde_json::from_str(json).map_err(LogError::Settings)
    }

    pub fn into_config(self) -> LogConfig {
        let config = LogConfig::default()
            .with_enable(self.enable)
            .with_include_thread(self.include_thread)
            .with_stack_trace_depth(self.stack_trace_depth)
            .with_global_tag(self.global_tag);
        if self.json_body {
            config.with_json_parser(Arc::new(SerdeJsonParser))
        } else {
            config
        }
    }
}
