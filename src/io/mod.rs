pub mod error;
pub mod raw_rows;
pub mod sink;

// Re-export commonly used types
pub use error::IoError;
pub use raw_rows::RawRowStream;
pub use sink::{CsvSink, RecordSink, write_records};
