pub mod cleanup;
pub mod mapper;
pub mod validity;

// Re-export commonly used types
pub use cleanup::{CleanupRules, OpenAddressesCleanup};
pub use mapper::{OpenAddressesMapper, SemanticMapper};
pub use validity::{OpenAddressesValidity, ValidityPredicate};

/// The three per-row collaborators a pipeline is built from. Each seam is a
/// trait so callers can substitute their own rules; the defaults implement
/// OpenAddresses semantics.
pub struct PipelineRules {
    pub validity: Box<dyn ValidityPredicate>,
    pub cleanup: Box<dyn CleanupRules>,
    pub mapper: Box<dyn SemanticMapper>,
}

impl PipelineRules {
    pub fn new(
        validity: impl ValidityPredicate + 'static,
        cleanup: impl CleanupRules + 'static,
        mapper: impl SemanticMapper + 'static,
    ) -> Self {
        Self {
            validity: Box::new(validity),
            cleanup: Box::new(cleanup),
            mapper: Box::new(mapper),
        }
    }
}

impl Default for PipelineRules {
    fn default() -> Self {
        Self::new(
            OpenAddressesValidity,
            OpenAddressesCleanup,
            OpenAddressesMapper,
        )
    }
}
