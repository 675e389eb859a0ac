use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("configuration unavailable at {path}: {reason}")]
    ConfigUnavailable { path: String, reason: String },

    #[error("configuration invalid: {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("lead source unavailable at {path}: {reason}")]
    LeadSourceUnavailable { path: String, reason: String },

    #[error("lead source invalid: {0}")]
    LeadSourceInvalid(String),

    #[error("invalid date (expected dd/mm/yyyy or yyyy-mm-dd): {0}")]
    InvalidDate(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScorerError {
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ScorerError::ConfigUnavailable { .. } | ScorerError::ConfigInvalid { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScorerError>;
