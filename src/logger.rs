//! Terminal logging with colored module prefixes and a loading progress bar.
//!
//! # Example
//!
//! ```ignore
//! log!("routes"; "planned {} routes", count);
//!
//! let progress = Progress::new("content", files.len());
//! files.par_iter().for_each(|_| progress.inc());
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stderr, stdout},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Set while a progress bar owns the last terminal line.
static BAR_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Log lines and bars go to stderr instead of stdout.
static TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Route log output to stderr, leaving stdout to command output.
pub fn log_to_stderr(enable: bool) {
    TO_STDERR.store(enable, Ordering::SeqCst);
}

fn logs_to_stderr() -> bool {
    TO_STDERR.load(Ordering::SeqCst)
}

/// Run the body with `out` bound to the locked log stream.
macro_rules! with_log_stream {
    (|$out:ident| $body:expr) => {
        if logs_to_stderr() {
            let mut $out = stderr().lock();
            $body
        } else {
            let mut $out = stdout().lock();
            $body
        }
    };
}

// ============================================================================
// Layout Constants
// ============================================================================
//
// Progress bar format: "[content] [████░░░░] 42/100"

/// Brackets around the module name plus the following space: "[] "
const PREFIX_OVERHEAD: usize = 3;
/// Bar wrapper and the space before the count: " [] "
const BAR_OVERHEAD: usize = 4;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120)) as usize
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print one log line. Single-line messages are cut to the terminal width.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let max_len = terminal_width().saturating_sub(module.len() + PREFIX_OVERHEAD);
    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, max_len)
    };

    with_log_stream!(|out| {
        if BAR_ACTIVE.load(Ordering::SeqCst) {
            // Reprinted by the next progress update.
            execute!(out, Clear(ClearType::CurrentLine)).ok();
            write!(out, "\r").ok();
        }
        writeln!(out, "{prefix} {message}").ok();
        out.flush().ok();
    })
}

/// Color a module prefix by its role.
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "routes" => prefix.bright_blue().bold(),
        "build" => prefix.bright_green().bold(),
        "warn" | "links" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate to at most `max_len` bytes on a UTF-8 boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress Bar
// ============================================================================

/// Single-line progress bar, safe to advance from rayon workers.
pub struct Progress {
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
}

impl Progress {
    /// Create a bar, or `None` when there is at most one item to track.
    pub fn new(module: &str, total: usize) -> Option<Self> {
        if total <= 1 {
            return None;
        }
        BAR_ACTIVE.store(true, Ordering::SeqCst);
        Some(Self {
            prefix: colorize_prefix(module),
            prefix_len: module.len() + PREFIX_OVERHEAD,
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
        })
    }

    /// Advance by one and redraw.
    pub fn inc(&self) {
        let current = self.current.fetch_add(1, Ordering::Relaxed) + 1;
        let _guard = self.lock.lock().ok();

        let count = format!("{current}/{}", self.total);
        let line = format!("{} [{}] {count}", self.prefix, self.bar(current, count.len()));

        with_log_stream!(|out| {
            execute!(out, Clear(ClearType::CurrentLine)).ok();
            write!(out, "\r{line}").ok();
            out.flush().ok();
        })
    }

    fn bar(&self, current: usize, count_len: usize) -> String {
        let available = terminal_width().saturating_sub(self.prefix_len + BAR_OVERHEAD + count_len);
        render_bar(current, self.total, available.clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH))
    }

    /// Erase the bar line.
    pub fn finish(&self) {
        if !BAR_ACTIVE.swap(false, Ordering::SeqCst) {
            return;
        }
        let _guard = self.lock.lock().ok();
        with_log_stream!(|out| {
            execute!(out, Clear(ClearType::CurrentLine), cursor::MoveToColumn(0)).ok();
            out.flush().ok();
        })
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Filled/empty cells for `current` of `total` in `width` cells.
fn render_bar(current: usize, total: usize, width: usize) -> String {
    let filled = if total > 0 {
        (current.min(total) * width) / total
    } else {
        0
    };
    "█".repeat(filled) + &"░".repeat(width - filled)
}

// ============================================================================
// Tests
// ============================================================================
