use crate::error::{Result, ScorerError};
use crate::types::config::ScoringConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "scoring_config.json";
pub const CONFIG_ENV_VAR: &str = "LEAD_SCORER_CONFIG";

/// `--config` wins, then `LEAD_SCORER_CONFIG`, then `./scoring_config.json`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    resolve_config_path_with_env(explicit, from_env)
}

pub(crate) fn resolve_config_path_with_env(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or(from_env.filter(|path| !path.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load_config(path: &Path) -> Result<ScoringConfig> {
    let unavailable = |reason: String| ScorerError::ConfigUnavailable {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| unavailable(format!("malformed JSON: {e}")))?;
    let config = parse_config(&value)?;
    info!(
        path = %path.display(),
        hot_fragments = config.roles.hot.len(),
        warm_fragments = config.roles.warm.len(),
        "loaded scoring configuration"
    );
    Ok(config)
}

/// Typed view of a parsed configuration document.
///
/// Errors name the offending key by its dotted path, with `[n]` for list
/// positions.
pub fn parse_config(value: &Value) -> Result<ScoringConfig> {
    let config = serde_path_to_error::deserialize::<_, ScoringConfig>(value).map_err(|e| {
        let path = e.path().to_string();
        let message = e.inner().to_string();
        match missing_field(&message) {
            Some(field) if path == "." => invalid(field, "missing required key"),
            Some(field) => invalid(&format!("{path}.{field}"), "missing required key"),
            None => invalid(&path, &message),
        }
    })?;
    debug!(?config, "parsed scoring configuration");
    Ok(config)
}

fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'))
}

fn invalid(key: &str, reason: &str) -> ScorerError {
    ScorerError::ConfigInvalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
