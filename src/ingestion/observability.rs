use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{LoadError, ReadFailure};

use super::compression::Compression;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (load failed on content or schema).
    Error,
    /// Critical error (missing source or I/O failure).
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The source path.
    pub path: PathBuf,
    /// Compression mode requested for the load.
    pub compression: Compression,
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows in the returned table.
    pub rows: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &LoadError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Fans callbacks out to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
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

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Prints one line per load event to stderr.
///
/// Failure lines name the failure kind plus its detail: the missing columns of a schema
/// failure, or the I/O or CSV cause (with the record line when known) of a read failure.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn success_line(ctx: &LoadContext, stats: LoadStats) -> String {
        format!("[load][ok] path={} rows={}", ctx.path.display(), stats.rows)
    }

    fn failure_line(ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) -> String {
        format!(
            "[load][{severity:?}] path={} compression={:?} {}",
            ctx.path.display(),
            ctx.compression,
            failure_detail(error)
        )
    }
}

impl LoadObserver for StdErrObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!("{}", Self::success_line(ctx, stats));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        eprintln!("{}", Self::failure_line(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        eprintln!("[ALERT]{}", Self::failure_line(ctx, severity, error));
    }
}

fn failure_detail(error: &LoadError) -> String {
    match error {
        LoadError::NotFound { .. } => "kind=not_found".to_string(),
        LoadError::Schema { missing } => format!("kind=schema missing={}", missing.join(",")),
        LoadError::Read { source: ReadFailure::Io(err), .. } => {
            format!("kind=read cause=io detail=\"{err}\"")
        }
        LoadError::Read { source: ReadFailure::Csv(err), .. } => match err.position() {
            Some(pos) => format!("kind=read cause=csv line={} detail=\"{err}\"", pos.line()),
            None => format!("kind=read cause=csv detail=\"{err}\""),
        },
    }
}

/// Emits load events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        tracing::info!(path = %ctx.path.display(), rows = stats.rows, "call table loaded");
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        match severity {
            LoadSeverity::Info => tracing::info!(path = %ctx.path.display(), %error, "load failed"),
            LoadSeverity::Warning => {
                tracing::warn!(path = %ctx.path.display(), %error, "load failed")
            }
            LoadSeverity::Error | LoadSeverity::Critical => {
                tracing::error!(path = %ctx.path.display(), ?severity, %error, "load failed")
            }
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        tracing::error!(path = %ctx.path.display(), ?severity, %error, alert = true, "load alert");
    }
}
