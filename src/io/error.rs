use std::io;
use thiserror::Error;

/// IO-level errors for reading and parsing address files.
///
/// Every variant is fatal for the whole run: a file that cannot be opened or
/// read (`Io`) and a line that cannot be tokenized at all (`Csv`/`CsvAsync`)
/// both abort the multi-file sequence. Row-level rejections are not errors
/// and never appear here.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV async parsing error: {0}")]
    CsvAsync(#[from] csv_async::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let wrapped = IoError::from(io_err);

        match wrapped {
            IoError::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn error_display_includes_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let wrapped = IoError::from(io_err);
        assert!(wrapped.to_string().contains("file not found"));
    }
}
