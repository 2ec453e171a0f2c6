use std::thread::Thread;

use crate::stack::Frame;

/// Renders one piece of log context as text.
pub trait LogFormatter<T: ?Sized> {
    fn format(&self, data: &T) -> Option<String>;
}

pub struct ThreadFormatter;

impl ThreadFormatter {
    pub fn format_name(&self, name: &str) -> String {
        format!("Thread{}", name)
    }
}

impl LogFormatter<Thread> for ThreadFormatter {
    fn format(&self, thread: &Thread) -> Option<String> {
        Some(self.format_name(thread.name().unwrap_or("<unnamed>")))
    }
}

/// Tree-style stack rendering:
///
/// ```text
/// stackTrace:
///     ├ app::screen.on_click(screen.rs:40)
///     └ app::main.run(main.rs:50)
/// ```
pub struct StackTraceFormatter;

impl LogFormatter<[Frame]> for StackTraceFormatter {
    fn format(&self, stack: &[Frame]) -> Option<String> {
        match stack.len() {
            0 => None,
            1 => Some(format!("\t─ {}", stack[0])),
            len => {
                let mut out = String::with_capacity(128);
                out.push_str("stackTrace:  \n");
                // frame 0 is represented by the header line
                for frame in &stack[1..len - 1] {
                    out.push_str("\t├ ");
                    out.push_str(&frame.to_string());
                    out.push('\n');
                }
                out.push_str("\t└ ");
                out.push_str(&stack[len - 1].to_string());
                Some(out)
            }
        }
    }
}
