use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tracing::info;

use super::record_stream::RecordStream;
use super::stats::{PipelineStats, StatsReporter};
use crate::domain::Record;
use crate::io::IoError;
use crate::rules::PipelineRules;

type OpeningFuture = Pin<Box<dyn Future<Output = Result<RecordStream, IoError>> + Send>>;

/// Where the sequencer currently is in its file list
enum State {
    /// No per-file chain live; the next poll picks the next path
    Idle,
    /// A file open (and chain construction) is in flight
    Opening(OpeningFuture),
    /// Forwarding records from the current file's chain
    Streaming(RecordStream),
    /// File list exhausted or a fatal error was yielded
    Finished,
}

/// Lazy concatenation of per-file record chains over an ordered file list.
///
/// At most one per-file chain is live at any instant, and a file is opened
/// only in response to downstream demand: the next path is not touched
/// until the consumer polls past the previous file's end. Records appear in
/// file-list order, and within a file in row order; files never interleave.
///
/// Stats and their periodic reporter are run-scoped: created here, shared
/// by every file's chain, and never reset between files. The reporter is
/// cancelled exactly once when the sequence ends (naturally, on a fatal
/// error, or by dropping the sequencer early), so no timer outlives the
/// consumer's interest.
///
/// Any chain error (unreadable file, untokenizable line) is fatal for the
/// whole run: it is yielded once and the sequencer terminates without
/// touching the remaining paths.
pub struct RecordSequencer {
    paths: std::vec::IntoIter<PathBuf>,
    rules: Arc<PipelineRules>,
    stats: Arc<PipelineStats>,
    reporter: Option<StatsReporter>,
    state: State,
}

impl RecordSequencer {
    /// Sequence the given files with the default OpenAddresses rules.
    ///
    /// Must be called within a tokio runtime (the stats reporter is spawned
    /// here). Files are read lazily, single-pass; re-invocation re-reads
    /// from scratch.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self::with_rules(paths, PipelineRules::default())
    }

    /// Sequence the given files with caller-supplied rules
    pub fn with_rules(paths: Vec<PathBuf>, rules: PipelineRules) -> Self {
        let stats = Arc::new(PipelineStats::new());
        let reporter = StatsReporter::spawn(Arc::clone(&stats));
        Self {
            paths: paths.into_iter(),
            rules: Arc::new(rules),
            stats,
            reporter: Some(reporter),
            state: State::Idle,
        }
    }

    /// The run-scoped counters, shared with every file's chain
    pub fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }

    /// Terminal transition: cancel the reporter exactly once and stop
    fn finish(&mut self) {
        if let Some(reporter) = self.reporter.take() {
            reporter.cancel();
        }
        self.state = State::Finished;
    }
}

impl Stream for RecordSequencer {
    type Item = Result<Record, IoError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match &mut this.state {
                State::Idle => match this.paths.next() {
                    Some(path) => {
                        info!(path = %path.display(), "creating record stream");
                        let rules = Arc::clone(&this.rules);
                        let stats = Arc::clone(&this.stats);
                        this.state = State::Opening(Box::pin(RecordStream::from_file(
                            path, rules, stats,
                        )));
                    }
                    None => {
                        this.finish();
                        return Poll::Ready(None);
                    }
                },
                State::Opening(opening) => match opening.as_mut().poll(cx) {
                    Poll::Ready(Ok(stream)) => this.state = State::Streaming(stream),
                    Poll::Ready(Err(e)) => {
                        this.finish();
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                },
                State::Streaming(stream) => match stream.poll_next_unpin(cx) {
                    Poll::Ready(Some(Ok(record))) => return Poll::Ready(Some(Ok(record))),
                    Poll::Ready(Some(Err(e))) => {
                        this.finish();
                        return Poll::Ready(Some(Err(e)));
                    }
                    // Current file drained cleanly; the next poll turn of
                    // the loop picks the next path, if any
                    Poll::Ready(None) => this.state = State::Idle,
                    Poll::Pending => return Poll::Pending,
                },
                State::Finished => return Poll::Ready(None),
            }
        }
    }
}
