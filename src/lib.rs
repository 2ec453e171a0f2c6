//! HiLog: a leveled, tagged logging facade for Android apps.
//!
//! A [`LogManager`] formats each call (optional thread line, optional
//! caller stack block, serialized contents) and fans the resulting record
//! out to its printers: the logcat console printer, the in-app view
//! printer, or any custom [`LogPrinter`]. The JNI entry points expose the
//! same facade to the Java side.
//!
//! ```
//! use std::sync::Arc;
//! use hilog_jni::{values, LogConfig, LogManager, ViewPrinter};
//!
//! let view = Arc::new(ViewPrinter::default());
//! let manager = LogManager::new(LogConfig::default().with_stack_trace_depth(0), vec![view.clone()]);
//! manager.it("Demo", &values!["a", 1]).unwrap();
//! assert_eq!(view.items()[0].log, "a;1");
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod formatter;
mod jni_bindings;
pub mod level;
mod logging;
pub mod manager;
pub mod printer;
pub mod stack;
pub mod value;

pub use config::{JsonParser, LogConfig, LogSettings, SerdeJsonParser};
pub use dispatcher::DispatchReport;
pub use error::LogError;
pub use level::LogLevel;
pub use logging::init_android_logger;
pub use manager::LogManager;
pub use printer::{ConsolePrinter, LogPrinter, LogRecord, ViewPrinter};
pub use value::LogValue;
