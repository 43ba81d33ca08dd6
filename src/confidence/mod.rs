pub mod engine;
pub mod score;

pub use engine::{
    agent_confidence, combine_scores, recovery_confidence, validation_confidence,
    workflow_confidence, DEFAULT_AGENT_BASE, DEFAULT_RECOVERY_BASE, DEFAULT_VALIDATION_BASE,
};
pub use score::{normalize, ConfidenceScore, Delusion, Metadata, Severity};
