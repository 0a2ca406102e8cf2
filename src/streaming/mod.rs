pub mod record_stream;
pub mod sequencer;
pub mod stats;

// Re-export commonly used types
pub use record_stream::RecordStream;
pub use sequencer::RecordSequencer;
pub use stats::{PipelineStats, REPORT_INTERVAL, StatsReporter};
