use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local};
use log::warn;

use crate::config::LogConfig;
use crate::error::Result;
use crate::level::LogLevel;

use super::{LogPrinter, LogRecord};

pub const DEFAULT_VIEW_CAPACITY: usize = 1000;

/// One entry of the on-screen log list.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewLogItem {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub tag: String,
    pub log: String,
}

impl ViewLogItem {
    /// Header line plus message, as shown in the overlay:
    /// `2022-03-22 22:34:46|loglevel:6|TAG|\n<message>`.
    pub fn assemble_visual_log(&self) -> String {
        format!(
            "{}|loglevel:{}|{}|\n{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level.priority(),
            self.tag,
            self.log
        )
    }

    pub fn highlight_color(&self) -> u32 {
        self.level.highlight_color()
    }
}

impl From<&LogRecord> for ViewLogItem {
    fn from(record: &LogRecord) -> Self {
        ViewLogItem {
            timestamp: record.timestamp,
            level: record.level,
            tag: record.tag.clone(),
            log: record.message.clone(),
        }
    }
}

/// Keeps printed records in memory for an in-app log overlay to display.
/// Holds at most `capacity` items, evicting the oldest first.
pub struct ViewPrinter {
    items: Mutex<VecDeque<ViewLogItem>>,
    capacity: usize,
}

impl Default for ViewPrinter {
    fn default() -> Self {
        ViewPrinter::new(DEFAULT_VIEW_CAPACITY)
    }
}

impl ViewPrinter {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        ViewPrinter {
            items: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_VIEW_CAPACITY))),
            capacity,
        }
    }

    fn lock_items(&self) -> MutexGuard<'_, VecDeque<ViewLogItem>> {
        match self.items.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("View printer mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    pub fn items(&self) -> Vec<ViewLogItem> {
        self.lock_items().iter().cloned().collect()
    }

    /// Takes every buffered item, leaving the printer empty.
    pub fn drain(&self) -> Vec<ViewLogItem> {
        self.lock_items().drain(..).collect()
    }

    pub fn clear(&self) {
        self.lock_items().clear();
    }
}

impl LogPrinter for ViewPrinter {
    fn name(&self) -> &str {
        "view"
    }

    fn print(&self, _config: &LogConfig, record: &LogRecord) -> Result<()> {
        let mut items = self.lock_items();
        while items.len() >= self.capacity {
            items.pop_front();
        }
        items.push_back(ViewLogItem::from(record));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_assemble_visual_log() {
        let item = ViewLogItem {
            timestamp: Local
                .with_ymd_and_hms(2022, 3, 22, 22, 34, 46)
                .single()
                .expect("Ambiguous local time"),
            level: LogLevel::E,
            tag: "----".to_string(),
            log: "5566".to_string(),
        };
        assert_eq!(item.assemble_visual_log(), "2022-03-22 22:34:46|loglevel:6|----|\n5566");
        assert_eq!(item.highlight_color(), 0xffff6b68);
    }

    #[test]
    fn test_print_appends_in_order() {
        let printer = ViewPrinter::default();
        let config = LogConfig::default();
        for i in 0..3 {
            let record = LogRecord::new(LogLevel::I, "TAG", format!("message {}", i));
            printer.print(&config, &record).expect("Print failed");
        }
        let logs: Vec<_> = printer.items().into_iter().map(|item| item.log).collect();
        assert_eq!(logs, vec!["message 0", "message 1", "message 2"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let printer = ViewPrinter::new(2);
        let config = LogConfig::default();
        for i in 0..5 {
            printer
                .print(&config, &LogRecord::new(LogLevel::D, "TAG", i.to_string()))
                .expect("Print failed");
        }
        let logs: Vec<_> = printer.items().into_iter().map(|item| item.log).collect();
        assert_eq!(logs, vec!["3", "4"]);
    }

    #[test]
    fn test_drain_empties_buffer() {
        let printer = ViewPrinter::new(10);
        printer
            .print(&LogConfig::default(), &LogRecord::new(LogLevel::V, "TAG", "x"))
            .expect("Print failed");
        assert_eq!(printer.len(), 1);
        assert_eq!(printer.drain().len(), 1);
        assert!(printer.is_empty());
    }
}
