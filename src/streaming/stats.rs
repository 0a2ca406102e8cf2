use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// How often the reporter logs the running bad-record count
pub const REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Counters shared across every stage and file of one run.
///
/// Created once per run and never reset between files. Written only by the
/// mapping stage (one rejection per increment) and read by the periodic
/// reporter; rows dropped by the validity filter are not counted.
#[derive(Debug, Default)]
pub struct PipelineStats {
    bad_records: AtomicU64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one semantic rejection
    pub fn record_bad(&self) {
        self.bad_records.fetch_add(1, Ordering::Relaxed);
    }

    /// Cumulative rejections so far; never resets during a run
    pub fn bad_record_count(&self) -> u64 {
        self.bad_records.load(Ordering::Relaxed)
    }
}

/// Periodic advisory logger for the shared stats.
///
/// Runs as a detached task; reporting never blocks or gates the pipeline,
/// and a missed tick has no effect on the records produced. Cancelled
/// explicitly on natural end-of-stream and implicitly on drop, so an early
/// consumer detach never leaves a live timer behind.
#[derive(Debug)]
pub struct StatsReporter {
    handle: JoinHandle<()>,
}

impl StatsReporter {
    /// Spawn a reporter ticking at [`REPORT_INTERVAL`].
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(stats: Arc<PipelineStats>) -> Self {
        Self::with_interval(stats, REPORT_INTERVAL)
    }

    /// Spawn a reporter with a custom tick period
    pub fn with_interval(stats: Arc<PipelineStats>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick of a tokio interval fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                debug!(
                    bad_records = stats.bad_record_count(),
                    "number of bad records"
                );
            }
        });
        Self { handle }
    }

    /// Stop the reporter. Idempotent: safe to call more than once, and safe
    /// when no row was ever processed.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort handle that outlives the reporter, for observing cancellation
    #[cfg(test)]
    pub(crate) fn cancel_probe(&self) -> tokio::task::AbortHandle {
        self.handle.abort_handle()
    }
}

impl Drop for StatsReporter {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
