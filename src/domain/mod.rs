pub mod error;
pub mod record;
pub mod row;

// Re-export commonly used types
pub use error::DomainError;
pub use record::{Address, Geometry, Record};
pub use row::{CleanedRow, Header, RawRow};
