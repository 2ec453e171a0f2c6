use std::fmt;
use std::path::Path;

/// Module prefix of this crate; frames under it are the facade's own internals.
pub const IGNORE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// One call site in a captured stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Module path (or impl block) that owns the routine
    pub owner: String,
    pub routine: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Frame {
    pub fn new(owner: impl Into<String>, routine: impl Into<String>, file: Option<String>, line: Option<u32>) -> Self {
        Frame {
            owner: owner.into(),
            routine: routine.into(),
            file,
            line,
        }
    }

    /// Splits a demangled symbol such as `app::net::Client::send` into
    /// its owner (`app::net::Client`) and routine (`send`). Separators inside
    /// `<...>` belong to the owner.
    pub fn from_symbol(symbol: &str, file: Option<String>, line: Option<u32>) -> Self {
        match split_symbol(symbol) {
            Some((owner, routine)) => Frame::new(owner, routine, file, line),
            None => Frame::new("", symbol, file, line),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.owner.is_empty() {
            write!(f, "{}.", self.owner)?;
        }
        write!(f, "{}(", self.routine)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}", file, line)?,
            (Some(file), None) => f.write_str(file)?,
            (None, _) => f.write_str("Unknown Source")?,
        }
        f.write_str(")")
    }
}

fn split_symbol(symbol: &str) -> Option<(&str, &str)> {
    let bytes = symbol.as_bytes();
    let mut depth = 0usize;
    let mut split = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                split = Some(i);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    split.map(|at| (&symbol[..at], &symbol[at + 2..]))
}

/// Captures the current call stack, innermost frame first.
pub fn capture() -> Vec<Frame> {
    let mut frames = Vec::new();
    backtrace::trace(|raw| {
        backtrace::resolve_frame(raw, |symbol| {
            let name = match symbol.name() {
                Some(name) => format!("{:#}", name),
                None => "<unknown>".to_string(),
            };
            let file = symbol
                .filename()
                .and_then(Path::file_name)
                .map(|f| f.to_string_lossy().into_owned());
            frames.push(Frame::from_symbol(&name, file, symbol.lineno()));
        });
        true
    });
    frames
}

/// Drops the facade's own frames, then keeps at most `max_depth` caller
/// frames. A `max_depth` of 0 keeps every caller frame.
pub fn cropped_real_stack(stack: &[Frame], ignore_prefix: &str, max_depth: usize) -> Vec<Frame> {
    crop(valid_stack(stack, ignore_prefix), max_depth)
}

fn crop(stack: &[Frame], max_depth: usize) -> Vec<Frame> {
    let depth = if max_depth > 0 { max_depth.min(stack.len()) } else { stack.len() };
    stack[..depth].to_vec()
}

fn valid_stack<'a>(stack: &'a [Frame], ignore_prefix: &str) -> &'a [Frame] {
    if ignore_prefix.is_empty() {
        return stack;
    }
    let ignore_depth = stack
        .iter()
        .rposition(|frame| frame.owner.starts_with(ignore_prefix))
        .map(|index| index + 1)
        .unwrap_or(0);
    &stack[ignore_depth..]
}
