use super::role::score_role;
use crate::config::load_config;
use crate::error::Result;
use crate::types::config::ScoringConfig;
use crate::types::lead::{Flag, Lead, ScoredLead, POINTS_FIELD, ROLE_FIELD};
use serde_json::Value;
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info, warn};

/// Rounds to one decimal place, ties to even, judged on the exact decimal
/// value of the stored double.
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse::<f64>().unwrap_or(value)
}

/// `pontuacaoTotalFinal` as a number, without logging.
///
/// `None` when absent, null, or not convertible.
pub fn points_value(lead: &Lead) -> Option<f64> {
    match lead.get(POINTS_FIELD)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

/// Numeric read of `pontuacaoTotalFinal`.
///
/// Absent and null read as 0 silently. Numeric strings are accepted (with
/// either `.` or `,` as decimal separator); anything else reads as 0 and is
/// logged. The value is not clamped to 0..=100.
pub fn read_points(lead: &Lead) -> f64 {
    if let Some(points) = points_value(lead) {
        return points;
    }
    match lead.get(POINTS_FIELD) {
        None | Some(Value::Null) => {}
        Some(other) => warn!(
            lead = %lead.label(),
            value = %display_raw(other),
            "non-numeric {POINTS_FIELD}; using 0"
        ),
    }
    0.0
}

fn display_raw(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// The lead's `cargo`, or `None` when absent, null or not a string.
pub fn read_role(lead: &Lead) -> Option<&str> {
    match lead.get(ROLE_FIELD) {
        None | Some(Value::Null) => None,
        Some(Value::String(role)) => Some(role.as_str()),
        Some(other) => {
            warn!(
                lead = %lead.label(),
                value = %other,
                "{ROLE_FIELD} is not text; treating as empty"
            );
            None
        }
    }
}

pub fn compute_score(lead: &Lead, config: &ScoringConfig) -> f64 {
    let numeric = read_points(lead);
    let role = score_role(read_role(lead), config);
    let combined = role * config.weights.role + numeric * config.weights.points;
    round_one_decimal(combined)
}

/// Inclusive at both thresholds; a score equal to a threshold takes the higher tier.
pub fn classify(score: f64, config: &ScoringConfig) -> Flag {
    if score >= config.thresholds.hot.min {
        Flag::Hot
    } else if score >= config.thresholds.warm.min {
        Flag::Warm
    } else {
        Flag::Cold
    }
}

pub fn score_lead(lead: &Lead, config: &ScoringConfig) -> ScoredLead {
    let score = compute_score(lead, config);
    let flag = classify(score, config);
    debug!(lead = %lead.label(), score, flag = %flag, "scored lead");
    ScoredLead {
        lead: lead.clone(),
        score,
        flag,
    }
}

/// Scores every lead and returns copies ordered by score, highest first.
///
/// The sort is stable: leads with equal scores keep their input order.
pub fn score_batch(leads: &[Lead], config: &ScoringConfig) -> Vec<ScoredLead> {
    let mut scored = leads
        .iter()
        .map(|lead| score_lead(lead, config))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}

/// Loads the configuration and scores the batch against it.
///
/// A configuration that cannot be loaded aborts before any lead is scored.
pub fn score_batch_from_path(leads: &[Lead], config_path: &Path) -> Result<Vec<ScoredLead>> {
    let config = load_config(config_path)?;
    let scored = score_batch(leads, &config);
    info!(count = scored.len(), "scored batch");
    Ok(scored)
}
