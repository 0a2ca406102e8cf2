use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::error::IoError;
use crate::domain::Record;

/// Downstream indexing seam: something that accepts the pipeline's records.
///
/// Sink failures are the consumer's own errors and abort the run; they are
/// unrelated to the pipeline's row accounting.
#[async_trait]
pub trait RecordSink: Send {
    /// Accept one record
    async fn write(&mut self, record: &Record) -> Result<(), IoError>;

    /// Flush any buffered output; called once after the last record
    async fn finish(&mut self) -> Result<(), IoError>;
}

/// Columns of the normalized CSV output, in order
const OUTPUT_COLUMNS: [&str; 9] = [
    "lon", "lat", "number", "street", "unit", "city", "district", "region", "postcode",
];

/// Writes records as normalized CSV lines to an async writer, header first
pub struct CsvSink<W> {
    writer: W,
    header_written: bool,
}

impl<W> CsvSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    async fn write_line(&mut self, fields: &[&str]) -> Result<(), IoError> {
        // The sync csv writer handles quoting; encode one line into a
        // buffer, then hand it to the async writer.
        let mut buf = Vec::new();
        {
            let mut encoder = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut buf);
            encoder.write_record(fields)?;
            encoder.flush()?;
        }
        self.writer.write_all(&buf).await?;
        Ok(())
    }
}

#[async_trait]
impl<W> RecordSink for CsvSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write(&mut self, record: &Record) -> Result<(), IoError> {
        if !self.header_written {
            self.write_line(&OUTPUT_COLUMNS).await?;
            self.header_written = true;
        }

        let lon = record.geometry.lon().to_string();
        let lat = record.geometry.lat().to_string();
        let address = &record.address;
        self.write_line(&[
            lon.as_str(),
            lat.as_str(),
            address.number.as_str(),
            address.street.as_str(),
            address.unit.as_deref().unwrap_or(""),
            address.city.as_deref().unwrap_or(""),
            address.district.as_deref().unwrap_or(""),
            address.region.as_deref().unwrap_or(""),
            address.postcode.as_deref().unwrap_or(""),
        ])
        .await
    }

    async fn finish(&mut self) -> Result<(), IoError> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// Drain a record stream into a sink, returning the number of records
/// written. The first fatal stream error aborts the drain and propagates;
/// the sink is not finished in that case.
pub async fn write_records<S, K>(mut records: S, sink: &mut K) -> Result<u64, IoError>
where
    S: Stream<Item = Result<Record, IoError>> + Unpin,
    K: RecordSink + ?Sized,
{
    let mut written = 0u64;
    while let Some(result) = records.next().await {
        let record = result?;
        sink.write(&record).await?;
        written += 1;
    }
    sink.finish().await?;
    Ok(written)
}
