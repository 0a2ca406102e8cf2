//! Batch import pipeline for OpenAddresses CSV files.
//!
//! Given an ordered list of file paths, [`streaming::RecordSequencer`]
//! produces one lazy stream of normalized address [`domain::Record`]s:
//! each file is parsed into header-keyed rows, structurally filtered,
//! field-cleaned, and semantically mapped, with files concatenated in
//! order and opened only on consumer demand. Rejected rows are counted in
//! run-scoped [`streaming::PipelineStats`] and reported periodically; a
//! file that cannot be read or tokenized aborts the whole run.

pub mod app;
pub mod domain;
pub mod io;
pub mod prelude;
pub mod rules;
pub mod streaming;
