use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::io::AsyncRead;
use futures::{Stream, TryStreamExt, future};
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::debug;

use super::stats::PipelineStats;
use crate::domain::Record;
use crate::io::{IoError, RawRowStream};
use crate::rules::PipelineRules;

/// One file's full processing chain: raw rows → validity filter → cleanup →
/// semantic mapping, exposed as a stream of records.
///
/// The chain is pull-based end to end: no stage produces output until this
/// stream is polled, so consumer backpressure propagates through every stage
/// down to the file read. Rows dropped by the validity filter leave no
/// trace; rows rejected by the mapper increment the shared stats counter.
/// Order of emitted records follows input row order.
pub struct RecordStream {
    inner: Pin<Box<dyn Stream<Item = Result<Record, IoError>> + Send>>,
}

impl RecordStream {
    /// Build the chain over an async reader
    pub fn new<R>(reader: R, rules: Arc<PipelineRules>, stats: Arc<PipelineStats>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        Self::from_rows(RawRowStream::new(reader), rules, stats)
    }

    /// Build the chain over a file, opened lazily by the caller's demand
    pub async fn from_file(
        path: impl AsRef<Path>,
        rules: Arc<PipelineRules>,
        stats: Arc<PipelineStats>,
    ) -> Result<Self, IoError> {
        let file = File::open(path.as_ref()).await?;
        Ok(Self::new(file.compat(), rules, stats))
    }

    fn from_rows(rows: RawRowStream, rules: Arc<PipelineRules>, stats: Arc<PipelineStats>) -> Self {
        let filter_rules = Arc::clone(&rules);
        let cleanup_rules = Arc::clone(&rules);
        let mapper_rules = rules;

        let records = rows
            .try_filter(move |row| future::ready(filter_rules.validity.is_valid(row)))
            .map_ok(move |row| cleanup_rules.cleanup.clean(row))
            .try_filter_map(move |row| {
                let mapped = match mapper_rules.mapper.map(row) {
                    Ok(record) => Some(record),
                    Err(rejection) => {
                        debug!(%rejection, "row rejected at mapping");
                        stats.record_bad();
                        None
                    }
                };
                future::ready(Ok(mapped))
            });

        Self {
            inner: Box::pin(records),
        }
    }
}

impl Stream for RecordStream {
    type Item = Result<Record, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
