//! Debug output for the gallery
//!
//! Debug lines always go to the log file when a global logger is installed.
//! With `HERITAGE_DEBUG=1` (or `--debug`) they are echoed to stderr as well.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Cached environment check (read once)
static DEBUG_FROM_ENV: OnceLock<bool> = OnceLock::new();

/// Set by the `--debug` flag
static DEBUG_FORCED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG_FORCED.load(Ordering::Relaxed)
        || *DEBUG_FROM_ENV.get_or_init(|| {
            std::env::var("HERITAGE_DEBUG")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        })
}

pub fn enable_debug() {
    DEBUG_FORCED.store(true, Ordering::Relaxed);
}

/// Debug print with module prefix
#[inline]
pub fn debug_print_module(module: &str, msg: &str) {
    let line = format!("[{}] {}", module, msg);
    if is_debug_enabled() {
        eprintln!("🔧 {}", line);
    }
    crate::utils::logger::debug(&line);
}

/// Timing helper for slow operations such as a generation round trip
pub struct DebugTimer {
    name: String,
    start: std::time::Instant,
}

impl DebugTimer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: std::time::Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    /// Log the total duration
    pub fn finish(self) {
        debug_print_module(
            "PERF",
            &format!("{} completed in {:?}", self.name, self.start.elapsed()),
        );
    }
}

/// Debug print macro with module prefix
///
/// ```rust,ignore
/// debug_module!("API", "Sending request to {}", endpoint);
/// ```
#[macro_export]
macro_rules! debug_module {
    ($module:expr, $($arg:tt)*) => {
        $crate::utils::debug::debug_print_module($module, &format!($($arg)*))
    };
}
