use anyhow::{bail, Result};
use serde_json::json;

use super::score::{ConfidenceScore, Delusion, Metadata, Severity};

/// Base confidence reported by an agent that found nothing.
pub const DEFAULT_AGENT_BASE: f64 = 0.9;
/// Base confidence for a recovery engine that made no changes.
pub const DEFAULT_RECOVERY_BASE: f64 = 0.5;
/// Base confidence for a validator that found no issues.
pub const DEFAULT_VALIDATION_BASE: f64 = 0.9;

/// Score a detection agent's run from the delusions it reported.
///
/// An empty list means a clean run at `base_confidence` (0.9 when not
/// given). Otherwise each delusion's confidence (0.5 when absent) is
/// scaled by severity and the results are averaged, capped at 1.0.
pub fn agent_confidence(delusions: &[Delusion], base_confidence: Option<f64>) -> ConfidenceScore {
    let base = base_confidence.unwrap_or(DEFAULT_AGENT_BASE);

    if delusions.is_empty() {
        let mut metadata = Metadata::new();
        metadata.insert("method".to_string(), json!("agent_confidence"));
        metadata.insert("base_confidence".to_string(), json!(base));
        return ConfidenceScore::new(base, vec!["no_delusions_found".to_string()], metadata);
    }

    let mut total = 0.0;
    let mut factors = Vec::new();

    for delusion in delusions {
        let confidence = delusion.confidence.unwrap_or(0.5);

        // The 1.2/0.8/1.0 multipliers and factor spellings are compat
        // surface for downstream consumers; high severity scales the
        // contribution up despite the "penalty" name.
        let adjusted = match delusion.severity {
            Severity::High => {
                factors.push("high_severity_penalty".to_string());
                confidence * 1.2
            }
            Severity::Low => {
                factors.push("low_severity_penalty".to_string());
                confidence * 0.8
            }
            Severity::Medium => {
                factors.push("medium_severity".to_string());
                confidence
            }
        };

        total += adjusted;
    }

    let average = total / delusions.len() as f64;

    let mut metadata = Metadata::new();
    metadata.insert("method".to_string(), json!("agent_confidence"));
    metadata.insert("delusion_count".to_string(), json!(delusions.len()));
    metadata.insert("average_delusion_confidence".to_string(), json!(average));

    ConfidenceScore::new(average.min(1.0), factors, metadata)
}

/// Score a recovery engine's run from the fixes it applied.
///
/// Confidence rises 0.1 per change, capped at +0.4, and never exceeds
/// 0.9. Both factors are reported whenever any change exists, single
/// change included.
pub fn recovery_confidence(changes_made: &[String], base_confidence: Option<f64>) -> ConfidenceScore {
    let base = base_confidence.unwrap_or(DEFAULT_RECOVERY_BASE);

    if changes_made.is_empty() {
        let mut metadata = Metadata::new();
        metadata.insert("method".to_string(), json!("recovery_confidence"));
        metadata.insert("base_confidence".to_string(), json!(base));
        return ConfidenceScore::new(base, vec!["no_changes_made".to_string()], metadata);
    }

    let increase = (changes_made.len() as f64 * 0.1).min(0.4);
    let value = (base + increase).min(0.9);

    let mut metadata = Metadata::new();
    metadata.insert("method".to_string(), json!("recovery_confidence"));
    metadata.insert("changes_count".to_string(), json!(changes_made.len()));
    metadata.insert("confidence_increase".to_string(), json!(increase));

    ConfidenceScore::new(
        value,
        vec![
            "changes_successful".to_string(),
            "multiple_changes".to_string(),
        ],
        metadata,
    )
}

/// Score a validator's run from the issues it flagged.
///
/// Confidence drops 0.1 per issue, capped at -0.8, and never falls
/// below 0.1. Both factors are reported whenever any issue exists.
pub fn validation_confidence(issues: &[String], base_confidence: Option<f64>) -> ConfidenceScore {
    let base = base_confidence.unwrap_or(DEFAULT_VALIDATION_BASE);

    if issues.is_empty() {
        let mut metadata = Metadata::new();
        metadata.insert("method".to_string(), json!("validation_confidence"));
        metadata.insert("base_confidence".to_string(), json!(base));
        return ConfidenceScore::new(base, vec!["no_issues_found".to_string()], metadata);
    }

    let decrease = (issues.len() as f64 * 0.1).min(0.8);
    let value = (base - decrease).max(0.1);

    let mut metadata = Metadata::new();
    metadata.insert("method".to_string(), json!("validation_confidence"));
    metadata.insert("issues_count".to_string(), json!(issues.len()));
    metadata.insert("confidence_decrease".to_string(), json!(decrease));

    ConfidenceScore::new(
        value,
        vec!["issues_found".to_string(), "multiple_issues".to_string()],
        metadata,
    )
}

/// Score a workflow run from its completion progress and the
/// confidence of the steps that did run.
///
/// Completion ratio carries 60% of the weight, average step confidence
/// 40% (0.5 stands in when no step scores exist). A workflow with no
/// steps defined scores 0.0 outright.
pub fn workflow_confidence(
    steps_completed: usize,
    total_steps: usize,
    step_confidence_scores: &[f64],
) -> ConfidenceScore {
    if total_steps == 0 {
        let mut metadata = Metadata::new();
        metadata.insert("method".to_string(), json!("workflow_confidence"));
        return ConfidenceScore::new(0.0, vec!["no_steps_defined".to_string()], metadata);
    }

    let completion_ratio = steps_completed as f64 / total_steps as f64;

    let avg_step_confidence = if step_confidence_scores.is_empty() {
        0.5
    } else {
        step_confidence_scores.iter().sum::<f64>() / step_confidence_scores.len() as f64
    };

    let value = completion_ratio * 0.6 + avg_step_confidence * 0.4;

    let mut factors = Vec::new();
    if completion_ratio == 1.0 {
        factors.push("workflow_completed".to_string());
    } else if completion_ratio > 0.5 {
        factors.push("workflow_partially_completed".to_string());
    } else {
        factors.push("workflow_early_stage".to_string());
    }

    if avg_step_confidence > 0.8 {
        factors.push("high_step_confidence".to_string());
    } else if avg_step_confidence < 0.3 {
        factors.push("low_step_confidence".to_string());
    }

    let mut metadata = Metadata::new();
    metadata.insert("method".to_string(), json!("workflow_confidence"));
    metadata.insert("completion_ratio".to_string(), json!(completion_ratio));
    metadata.insert(
        "average_step_confidence".to_string(),
        json!(avg_step_confidence),
    );
    metadata.insert("steps_completed".to_string(), json!(steps_completed));
    metadata.insert("total_steps".to_string(), json!(total_steps));

    ConfidenceScore::new(value, factors, metadata)
}

/// Fold several scores into one weighted average.
///
/// Missing weights mean equal weighting. Supplied weights must match
/// the score count exactly; they are renormalized to sum to 1.0 unless
/// their sum is zero, in which case they are used as-is. Factors
/// concatenate in input order with duplicates retained.
pub fn combine_scores(
    scores: &[ConfidenceScore],
    weights: Option<&[f64]>,
) -> Result<ConfidenceScore> {
    if scores.is_empty() {
        let mut metadata = Metadata::new();
        metadata.insert("method".to_string(), json!("combined_confidence"));
        return Ok(ConfidenceScore::new(
            0.0,
            vec!["no_scores_provided".to_string()],
            metadata,
        ));
    }

    let mut weights: Vec<f64> = match weights {
        Some(supplied) => {
            if supplied.len() != scores.len() {
                bail!(
                    "number of weights must match number of scores: got {} weights for {} scores",
                    supplied.len(),
                    scores.len()
                );
            }
            supplied.to_vec()
        }
        None => vec![1.0 / scores.len() as f64; scores.len()],
    };

    let weight_sum: f64 = weights.iter().sum();
    if weight_sum != 0.0 {
        for weight in &mut weights {
            *weight /= weight_sum;
        }
    }

    let combined_value: f64 = scores
        .iter()
        .zip(&weights)
        .map(|(score, weight)| score.value() * weight)
        .sum();

    let all_factors: Vec<String> = scores
        .iter()
        .flat_map(|score| score.factors().iter().cloned())
        .collect();

    let individual_scores: Vec<f64> = scores.iter().map(|score| score.value()).collect();

    let mut metadata = Metadata::new();
    metadata.insert("method".to_string(), json!("combined_confidence"));
    metadata.insert("score_count".to_string(), json!(scores.len()));
    metadata.insert("weights".to_string(), json!(weights));
    metadata.insert("individual_scores".to_string(), json!(individual_scores));

    Ok(ConfidenceScore::new(combined_value, all_factors, metadata))
}
