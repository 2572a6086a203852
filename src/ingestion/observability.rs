use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AnalysisError;

use super::unified::TableFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the load failed because of the input).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Path or upload name the table came from.
    pub source: String,
    /// Format used for loading.
    pub format: TableFormat,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of loaded student rows.
    pub rows: usize,
    /// Number of columns after identity columns were guaranteed.
    pub columns: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &AnalysisError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Forwards load events to the [`log`] facade (target `marks_analysis::load`).
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(
            target: "marks_analysis::load",
            "loaded format={:?} source={} rows={} columns={}",
            ctx.format,
            ctx.source,
            stats.rows,
            stats.columns
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        let level = match severity {
            LoadSeverity::Info => log::Level::Info,
            LoadSeverity::Warning => log::Level::Warn,
            LoadSeverity::Error | LoadSeverity::Critical => log::Level::Error,
        };
        log::log!(
            target: "marks_analysis::load",
            level,
            "load failed severity={:?} format={:?} source={} err={}",
            severity,
            ctx.format,
            ctx.source,
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        log::error!(
            target: "marks_analysis::load",
            "ALERT severity={:?} format={:?} source={} err={}",
            severity,
            ctx.format,
            ctx.source,
            error
        );
    }
}

/// One observer callback, rendered as a single `key=value` line.
enum LoadEvent<'a> {
    Loaded(LoadStats),
    Failed(LoadSeverity, &'a AnalysisError),
    Alert(LoadSeverity, &'a AnalysisError),
}

impl LoadEvent<'_> {
    fn render(&self, ctx: &LoadContext) -> String {
        match self {
            LoadEvent::Loaded(stats) => format!(
                "ok format={:?} source={} rows={} columns={}",
                ctx.format, ctx.source, stats.rows, stats.columns
            ),
            LoadEvent::Failed(severity, error) => format!(
                "fail severity={severity:?} format={:?} source={} err={error}",
                ctx.format, ctx.source
            ),
            LoadEvent::Alert(severity, error) => format!(
                "ALERT severity={severity:?} format={:?} source={} err={error}",
                ctx.format, ctx.source
            ),
        }
    }
}

/// Prints load events to stderr, one `[load]` line each.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn emit(&self, ctx: &LoadContext, event: LoadEvent<'_>) {
        eprintln!("[load] {}", event.render(ctx));
    }
}

impl LoadObserver for StdErrObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.emit(ctx, LoadEvent::Loaded(stats));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        self.emit(ctx, LoadEvent::Failed(severity, error));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        self.emit(ctx, LoadEvent::Alert(severity, error));
    }
}

/// Appends timestamped load events to a local log file.
///
/// Writes are best-effort: a log file that cannot be opened or written is skipped.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Observer appending to `path`; the file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn emit(&self, ctx: &LoadContext, event: LoadEvent<'_>) {
        let line = format!("{} {}", unix_ts(), event.render(ctx));
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl LoadObserver for FileObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.emit(ctx, LoadEvent::Loaded(stats));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        self.emit(ctx, LoadEvent::Failed(severity, error));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        self.emit(ctx, LoadEvent::Alert(severity, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
