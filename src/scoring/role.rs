use crate::types::config::ScoringConfig;

pub const HOT_ROLE_SCORE: f64 = 100.0;
pub const WARM_ROLE_SCORE: f64 = 50.0;
pub const NO_ROLE_SCORE: f64 = 0.0;

pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// True when the normalized `value` contains any normalized fragment.
///
/// An absent or empty value never matches, whatever the fragment list holds.
pub fn matches_any<S: AsRef<str>>(value: Option<&str>, fragments: &[S]) -> bool {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return false;
    };
    let normalized = normalize(value);
    fragments
        .iter()
        .any(|fragment| normalized.contains(&normalize(fragment.as_ref())))
}

/// Hot fragments are checked first, so a role matching both tiers scores 100.
pub fn score_role(role: Option<&str>, config: &ScoringConfig) -> f64 {
    if matches_any(role, &config.roles.hot) {
        HOT_ROLE_SCORE
    } else if matches_any(role, &config.roles.warm) {
        WARM_ROLE_SCORE
    } else {
        NO_ROLE_SCORE
    }
}
