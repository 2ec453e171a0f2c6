use std::sync::Arc;

use hilog_jni::{values, LogConfig, LogManager, LogPrinter, ViewPrinter};

fn manager_with_depth(depth: usize) -> (LogManager, Arc<ViewPrinter>) {
    let view = Arc::new(ViewPrinter::new(10));
    let printers: Vec<Arc<dyn LogPrinter>> = vec![view.clone()];
    let config = LogConfig::default().with_stack_trace_depth(depth);
    (LogManager::new(config, printers), view)
}

#[inline(never)]
fn log_from_caller(manager: &LogManager, body: &str) {
    manager.it("Caller", &values![body]).expect("Dispatch failed");
}

fn stack_lines(message: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = message.split('\n').collect();
    lines.pop();
    lines
}

#[test]
fn test_single_frame_names_the_caller() {
    let (manager, view) = manager_with_depth(1);
    log_from_caller(&manager, "x");

    let message = view.items().remove(0).log;
    let lines = stack_lines(&message);
    assert_eq!(lines.len(), 1, "unexpected message: {:?}", message);
    assert!(lines[0].starts_with("\t─ caller_stack"), "unexpected frame: {:?}", lines[0]);
    assert!(lines[0].contains("log_from_caller(caller_stack.rs:"), "unexpected frame: {:?}", lines[0]);
    assert!(message.ends_with("\nx"));
}

#[test]
fn test_cropped_stack_excludes_facade_frames() {
    let (manager, view) = manager_with_depth(3);
    log_from_caller(&manager, "body");

    let message = view.items().remove(0).log;
    let lines = stack_lines(&message);
    assert!(!lines.is_empty() && lines.len() <= 3, "unexpected message: {:?}", message);
    assert_eq!(lines[0], "stackTrace:  ");
    assert!(lines[1].contains("caller_stack"), "caller frame missing: {:?}", message);
    for line in &lines {
        assert!(!line.contains("hilog_jni::"), "facade frame leaked: {:?}", line);
        assert!(!line.contains("backtrace::"), "capture frame leaked: {:?}", line);
    }
    assert!(message.ends_with("\nbody"));
}
