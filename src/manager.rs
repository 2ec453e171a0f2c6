use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::LogConfig;
use crate::dispatcher::{self, DispatchReport};
use crate::error::Result;
use crate::level::LogLevel;
use crate::printer::LogPrinter;
use crate::value::LogValue;

type PrinterList = Vec<Arc<dyn LogPrinter>>;

/// Holds the default config and printers, and exposes the leveled call
/// surface. Printer list changes swap in a new snapshot, so a dispatch in
/// flight keeps the list it started with.
pub struct LogManager {
    config: LogConfig,
    printers: ArcSwap<PrinterList>,
}

impl LogManager {
    pub fn new(config: LogConfig, printers: PrinterList) -> Self {
        LogManager {
            config,
            printers: ArcSwap::from_pointee(printers),
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Current printer snapshot.
    pub fn printers(&self) -> Arc<PrinterList> {
        self.printers.load_full()
    }

    pub fn add_printer(&self, printer: Arc<dyn LogPrinter>) {
        self.printers.rcu(|current| {
            let mut next = PrinterList::clone(current);
            next.push(printer.clone());
            next
        });
    }

    /// Removes every registration of `printer`. Returns whether any was found.
    pub fn remove_printer(&self, printer: &Arc<dyn LogPrinter>) -> bool {
        let target = Arc::as_ptr(printer) as *const ();
        let previous = self.printers.rcu(|current| {
            current
                .iter()
                .filter(|p| Arc::as_ptr(*p) as *const () != target)
                .cloned()
                .collect::<PrinterList>()
        });
        previous.iter().any(|p| Arc::as_ptr(p) as *const () == target)
    }

    pub fn log_with_config(
        &self,
        config: &LogConfig,
        level: LogLevel,
        tag: &str,
        contents: &[LogValue],
    ) -> Result<DispatchReport> {
        let printers = self.printers.load();
        dispatcher::dispatch(config, level, tag, contents, &printers)
    }

    pub fn log_with_tag(&self, level: LogLevel, tag: &str, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log_with_config(&self.config, level, tag, contents)
    }

    pub fn log(&self, level: LogLevel, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log_with_tag(level, &self.config.global_tag, contents)
    }

    pub fn v(&self, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log(LogLevel::V, contents)
    }

    pub fn vt(&self, tag: &str, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log_with_tag(LogLevel::V, tag, contents)
    }

    pub fn d(&self, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log(LogLevel::D, contents)
    }

    pub fn dt(&self, tag: &str, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log_with_tag(LogLevel::D, tag, contents)
    }

    pub fn i(&self, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log(LogLevel::I, contents)
    }

    pub fn it(&self, tag: &str, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log_with_tag(LogLevel::I, tag, contents)
    }

    pub fn w(&self, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log(LogLevel::W, contents)
    }

    pub fn wt(&self, tag: &str, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log_with_tag(LogLevel::W, tag, contents)
    }

    pub fn e(&self, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log(LogLevel::E, contents)
    }

    pub fn et(&self, tag: &str, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log_with_tag(LogLevel::E, tag, contents)
    }

    pub fn a(&self, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log(LogLevel::A, contents)
    }

    pub fn at(&self, tag: &str, contents: &[LogValue]) -> Result<DispatchReport> {
        self.log_with_tag(LogLevel::A, tag, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::ViewPrinter;
    use crate::values;
    use std::thread;

    fn test_manager() -> (LogManager, Arc<ViewPrinter>) {
        let view = Arc::new(ViewPrinter::new(100));
        let config = LogConfig::default()
            .with_stack_trace_depth(0)
            .with_global_tag("MApplication");
        (LogManager::new(config, vec![view.clone()]), view)
    }

    #[test]
    fn test_global_tag_is_used_by_default() {
        let (manager, view) = test_manager();
        manager.i(&values!["a", "b"]).expect("Dispatch failed");

        let items = view.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tag, "MApplication");
        assert_eq!(items[0].level, LogLevel::I);
        assert_eq!(items[0].log, "a;b");
    }

    #[test]
    fn test_tagged_variants() {
        let (manager, view) = test_manager();
        manager.vt("T1", &values![1]).expect("Dispatch failed");
        manager.dt("T2", &values![2]).expect("Dispatch failed");
        manager.it("T3", &values![3]).expect("Dispatch failed");
        manager.wt("T4", &values![4]).expect("Dispatch failed");
        manager.et("T5", &values![5]).expect("Dispatch failed");
        manager.at("T6", &values![6]).expect("Dispatch failed");

        let seen: Vec<_> = view.items().into_iter().map(|i| (i.level, i.tag)).collect();
        assert_eq!(
            seen,
            vec![
                (LogLevel::V, "T1".to_string()),
                (LogLevel::D, "T2".to_string()),
                (LogLevel::I, "T3".to_string()),
                (LogLevel::W, "T4".to_string()),
                (LogLevel::E, "T5".to_string()),
                (LogLevel::A, "T6".to_string()),
            ]
        );
    }

    #[test]
    fn test_per_call_config() {
        let (manager, view) = test_manager();
        let config = LogConfig::default().with_stack_trace_depth(0).with_include_thread(true);
        manager
            .log_with_config(&config, LogLevel::E, "----", &values!["5566"])
            .expect("Dispatch failed");

        let log = view.items().remove(0).log;
        assert!(log.starts_with("Thread"));
        assert!(log.ends_with("\n5566"));
    }

    #[test]
    fn test_add_and_remove_printer() {
        let (manager, first) = test_manager();
        let second = Arc::new(ViewPrinter::new(10));
        let second_dyn: Arc<dyn LogPrinter> = second.clone();

        manager.add_printer(second_dyn.clone());
        assert_eq!(manager.printers().len(), 2);
        manager.w(&values!["both"]).expect("Dispatch failed");

        assert!(manager.remove_printer(&second_dyn));
        assert!(!manager.remove_printer(&second_dyn));
        manager.w(&values!["first only"]).expect("Dispatch failed");

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_concurrent_logging_while_printers_change() {
        let (manager, view) = test_manager();
        let manager = Arc::new(manager);
        let num_threads = 4;
        let logs_per_thread = 25;
        let mut handles = vec![];

        for thread_id in 0..num_threads {
            let manager = manager.clone();
            handles.push(thread::spawn(move || {
                for i in 0..logs_per_thread {
                    manager
                        .d(&values![format!("thread {} log {}", thread_id, i)])
                        .expect("Dispatch failed");
                }
            }));
        }

        let churn = {
            let manager = manager.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let extra: Arc<dyn LogPrinter> = Arc::new(ViewPrinter::new(5));
                    manager.add_printer(extra.clone());
                    manager.remove_printer(&extra);
                }
            })
        };

        for handle in handles {
            handle.join().expect("Thread panicked");
        }
        churn.join().expect("Thread panicked");

        assert_eq!(view.len(), num_threads * logs_per_thread);
        assert_eq!(manager.printers().len(), 1);
    }
}
