use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("theme configuration must be a JSON object")]
    NotAnObject,

    #[error("unknown top-level category `{0}` (overrides must not introduce new categories)")]
    UnknownCategory(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
