//! Log capture for tests.
//!
//! The engine reports degraded input and cache activity through `tracing`
//! at debug level and below, never through return values. Tests install a
//! capturing layer once per process and assert against the recorded
//! entries instead of scraping stderr.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Capture at most this many entries; older ones roll off.
const CAPTURE_LIMIT: usize = 1000;

static CAPTURE: OnceLock<Mutex<Capture>> = OnceLock::new();

fn capture() -> &'static Mutex<Capture> {
    CAPTURE.get_or_init(|| Mutex::new(Capture::new(CAPTURE_LIMIT)))
}

/// A captured log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub at: Instant,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    #[must_use]
    pub fn new(level: Level, target: &str, message: &str) -> Self {
        Self {
            level,
            target: target.to_string(),
            message: message.to_string(),
            at: Instant::now(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }
}

/// Bounded in-memory store of captured entries; oldest entries drop
/// first.
pub struct Capture {
    entries: VecDeque<LogEntry>,
    limit: usize,
}

impl Capture {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_message(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }

    #[must_use]
    pub fn contains_level(&self, level: Level) -> bool {
        self.entries.iter().any(|e| e.level == level)
    }

    /// Entries from one of the engine's log targets ("index", "cache",
    /// "opennow", "aggregate", "filter").
    #[must_use]
    pub fn with_target(&self, target: &str) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.target == target).collect()
    }

    fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

/// Snapshot of all captured entries, oldest first.
#[must_use]
pub fn get_logs() -> Vec<LogEntry> {
    capture().lock().map_or_else(|_| Vec::new(), |c| c.snapshot())
}

/// Drop every captured entry.
pub fn clear_logs() {
    if let Ok(mut c) = capture().lock() {
        c.clear();
    }
}

/// Whether any captured message contains `needle`.
#[must_use]
pub fn logs_contain(needle: &str) -> bool {
    capture()
        .lock()
        .is_ok_and(|c| c.contains_message(needle))
}

#[must_use]
pub fn logs_have_errors() -> bool {
    capture()
        .lock()
        .is_ok_and(|c| c.contains_level(Level::ERROR))
}

#[must_use]
pub fn logs_have_warnings() -> bool {
    capture()
        .lock()
        .is_ok_and(|c| c.contains_level(Level::WARN))
}

/// Render the capture for a failure message.
#[must_use]
pub fn format_logs_for_display() -> String {
    let logs = get_logs();
    if logs.is_empty() {
        return String::from("no logs captured");
    }

    let mut out = format!("captured {} log entries:\n", logs.len());
    for entry in logs {
        out.push_str(&format!(
            "  [{}] {}: {}\n",
            entry.level, entry.target, entry.message
        ));
        for (key, value) in &entry.fields {
            out.push_str(&format!("      {key} = {value}\n"));
        }
    }
    out
}

/// Layer that copies every event into the process-wide capture.
pub struct CaptureLayer;

struct FieldCollector {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldCollector {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();

        let mut collector = FieldCollector {
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut collector);

        let mut entry = LogEntry::new(*metadata.level(), metadata.target(), &collector.message);
        entry.fields = collector.fields;

        if let Ok(mut c) = capture().lock() {
            c.push(entry);
        }
    }
}

/// Install the capturing subscriber and clear previous captures.
///
/// `RUST_LOG` overrides `level` when set. Installation is
/// first-caller-wins process-wide; later calls still clear the store.
/// The returned guard prints the capture when the test panics.
#[must_use]
pub fn init_test_logging(level: &str) -> TestLoggingGuard {
    clear_logs();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(CaptureLayer);
    let _ = tracing::subscriber::set_global_default(subscriber);

    TestLoggingGuard {
        started: Instant::now(),
    }
}

/// Prints the captured logs if dropped while panicking.
pub struct TestLoggingGuard {
    started: Instant,
}

impl TestLoggingGuard {
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}

impl Drop for TestLoggingGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            eprintln!("\ntest failed after {:?}", self.elapsed());
            eprintln!("{}", format_logs_for_display());
        }
    }
}

/// Assert that a log entry with the given level and message fragment was
/// captured.
#[macro_export]
macro_rules! assert_log_contains {
    ($level:expr, $message:expr) => {{
        let logs = $crate::test_utils::logging::get_logs();
        let found = logs
            .iter()
            .any(|e| e.level == $level && e.message.contains($message));
        assert!(
            found,
            "expected a {} log containing '{}'\n{}",
            $level,
            $message,
            $crate::test_utils::logging::format_logs_for_display()
        );
    }};
}

/// Assert that no error-level logs were captured.
#[macro_export]
macro_rules! assert_no_errors {
    () => {{
        assert!(
            !$crate::test_utils::logging::logs_have_errors(),
            "expected no error logs\n{}",
            $crate::test_utils::logging::format_logs_for_display()
        );
    }};
}

/// Assert that no warning-level logs were captured.
#[macro_export]
macro_rules! assert_no_warnings {
    () => {{
        assert!(
            !$crate::test_utils::logging::logs_have_warnings(),
            "expected no warning logs\n{}",
            $crate::test_utils::logging::format_logs_for_display()
        );
    }};
}
