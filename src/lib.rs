// Shared library surface for the evaluator crew crates.

pub mod confidence;
pub mod config;
pub mod executor;
pub mod file_ops;
pub mod logging;
pub mod models;
pub mod validation;

// ---- Re-exports for the stable public API ----
pub use confidence::{
    agent_confidence, combine_scores, normalize, recovery_confidence, validation_confidence,
    workflow_confidence, ConfidenceScore, Delusion, Metadata, Severity,
};
pub use config::Settings;
pub use executor::RetryExecutor;
pub use models::{BaseConfig, BaseResult};
