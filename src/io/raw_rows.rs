use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::{Stream, StreamExt, TryStreamExt, stream};
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;

use super::error::IoError;
use crate::domain::{Header, RawRow};

/// Async stream of header-keyed rows from one OpenAddresses CSV file.
///
/// The first non-blank line names the columns; every subsequent non-blank
/// line becomes one [`RawRow`] keyed by those names. Fields are trimmed,
/// blank lines are skipped entirely, and ragged rows are tolerated rather
/// than failing the file. A line that cannot be tokenized at all surfaces
/// as a fatal [`IoError`].
pub struct RawRowStream {
    inner: Pin<Box<dyn Stream<Item = Result<RawRow, IoError>> + Send>>,
}

impl RawRowStream {
    /// Create a row stream from an async reader
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let mut csv_reader = AsyncReaderBuilder::new()
            .trim(csv_async::Trim::All)
            .flexible(true)
            .create_reader(reader);

        // The header must be read before any row can be keyed, so the
        // stream starts with a one-shot setup future flattened into the
        // record stream proper.
        let rows = stream::once(async move {
            let header_record = csv_reader.headers().await?;
            let header = Arc::new(Header::new(
                header_record.iter().map(str::to_string).collect(),
            ));

            Ok::<_, IoError>(csv_reader.into_records().map(move |result| {
                result
                    .map(|record| {
                        RawRow::new(
                            Arc::clone(&header),
                            record.iter().map(str::to_string).collect(),
                        )
                    })
                    .map_err(IoError::from)
            }))
        })
        .try_flatten();

        Self {
            inner: Box::pin(rows),
        }
    }

    /// Create a row stream from a file path
    ///
    /// Opens the file asynchronously; a failed open is a fatal
    /// [`IoError::Io`] for the run.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file = File::open(path.as_ref()).await?;
        Ok(Self::new(file.compat()))
    }
}

impl Stream for RawRowStream {
    type Item = Result<RawRow, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use futures::io::Cursor;
    use tokio_test::assert_ok;

    async fn collect_rows(csv_data: &str) -> Vec<RawRow> {
        RawRowStream::new(Cursor::new(csv_data.to_string().into_bytes()))
            .map(|result| assert_ok!(result))
            .collect()
            .await
    }

    #[tokio::test]
    async fn rows_are_keyed_by_header() {
        let rows = collect_rows(
            "\
lon,lat,number,street
-73.1,40.7,12,Main St
-73.2,40.8,14,Side St
",
        )
        .await;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("lon"), Some("-73.1"));
        assert_eq!(rows[0].get("street"), Some("Main St"));
        assert_eq!(rows[1].get("number"), Some("14"));
    }

    #[tokio::test]
    async fn fields_are_trimmed() {
        let rows = collect_rows(
            "\
lon, lat ,number,street
 -73.1 , 40.7 ,  12 ,  Main St
",
        )
        .await;

        assert_eq!(rows[0].get("lon"), Some("-73.1"));
        assert_eq!(rows[0].get("lat"), Some("40.7"));
        assert_eq!(rows[0].get("street"), Some("Main St"));
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let rows = collect_rows(
            "\
lon,lat,number,street

-73.1,40.7,12,Main St


-73.2,40.8,14,Side St
",
        )
        .await;

        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn all_empty_row_is_still_a_row() {
        // A line of separators is not blank: it produces a row of empty
        // values for the validity filter to reject downstream
        let rows = collect_rows(
            "\
lon,lat,number,street
,,,
",
        )
        .await;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("lon"), Some(""));
    }

    #[tokio::test]
    async fn ragged_rows_are_padded() {
        let rows = collect_rows(
            "\
lon,lat,number,street
-73.1,40.7
",
        )
        .await;

        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0].get("street"), Some(""));
    }

    #[tokio::test]
    async fn rows_share_the_file_header() {
        let rows = collect_rows(
            "\
lon,lat
1,2
3,4
",
        )
        .await;

        assert!(Arc::ptr_eq(rows[0].header(), rows[1].header()));
    }

    #[tokio::test]
    async fn empty_input_yields_no_rows() {
        let mut stream = RawRowStream::new(Cursor::new(Vec::new()));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn header_only_input_yields_no_rows() {
        let mut stream =
            RawRowStream::new(Cursor::new(b"lon,lat,number,street\n".to_vec()));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_fatal_error() {
        let mut data = b"lon,lat\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b',', b'1', b'\n']);

        let mut stream = RawRowStream::new(Cursor::new(data));
        let result = stream.next().await.unwrap();
        assert!(matches!(result, Err(IoError::CsvAsync(_))));
    }

    #[tokio::test]
    async fn missing_file_fails_to_open() {
        let result = RawRowStream::from_file("/nonexistent/addresses.csv").await;
        assert!(matches!(result, Err(IoError::Io(_))));
    }

    #[tokio::test]
    async fn reads_from_a_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addresses.csv");
        std::fs::write(&path, "lon,lat,number,street\n-73.1,40.7,12,Main St\n").unwrap();

        let stream = assert_ok!(RawRowStream::from_file(&path).await);
        let rows: Vec<_> = stream.map(|r| assert_ok!(r)).collect().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("number"), Some("12"));
    }
}
