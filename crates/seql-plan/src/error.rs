use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("unknown relation '{0}'")]
    UnknownRelation(String),

    #[error("relation '{0}' defined twice")]
    DuplicateRelation(String),

    #[error("invalid plan: {0}")]
    Invalid(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
}
