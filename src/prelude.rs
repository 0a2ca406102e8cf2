//! Prelude module for convenient imports
//!
//! Import everything you need with: `use oa_importer::prelude::*;`

// Domain types
pub use crate::domain::{Address, CleanedRow, DomainError, Geometry, Header, RawRow, Record};

// Rule types
pub use crate::rules::{
    CleanupRules, OpenAddressesCleanup, OpenAddressesMapper, OpenAddressesValidity, PipelineRules,
    SemanticMapper, ValidityPredicate,
};

// IO types
pub use crate::io::{CsvSink, IoError, RawRowStream, RecordSink, write_records};

// Streaming types
pub use crate::streaming::{PipelineStats, RecordSequencer, RecordStream, StatsReporter};

// App types
pub use crate::app::{AppError, CliApp};
