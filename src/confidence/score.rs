use serde::{Deserialize, Deserializer, Serialize};

/// Provenance attached to a score: method name, raw counts,
/// intermediate ratios. Diagnostic only; nothing downstream reads it
/// to make decisions.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Clamp a raw confidence value into [0.0, 1.0].
///
/// Exposed for callers sanitizing ad hoc values before wrapping them;
/// also the invariant behind every `ConfidenceScore` construction.
pub fn normalize(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// A normalized confidence score together with the factors that
/// produced it.
///
/// The value always lies in [0.0, 1.0]: `new` clamps out-of-range
/// input instead of rejecting it, and there is no construction path
/// that skips the clamp. Instances are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    #[serde(deserialize_with = "clamped")]
    value: f64,
    #[serde(default)]
    factors: Vec<String>,
    #[serde(default)]
    metadata: Metadata,
}

impl ConfidenceScore {
    pub fn new(value: f64, factors: Vec<String>, metadata: Metadata) -> Self {
        Self {
            value: normalize(value),
            factors,
            metadata,
        }
    }

    /// Confidence value in [0.0, 1.0].
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Factor tokens in computation order. Duplicates are meaningful:
    /// they record repeated conditions.
    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

fn clamped<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(normalize)
}

/// Severity tag on a detected delusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

/// A single delusion reported by a detection agent.
///
/// Agents that don't attach a confidence get 0.5 at scoring time;
/// severity defaults to medium. Extra fields in raw agent JSON are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delusion {
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub severity: Severity,
}
