use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("unknown step '{0}'")]
    UnknownStep(String),
    #[error("invalid wildcard '{0}', expected '<segment>.*'")]
    InvalidWildcard(String),
    #[error("wildcard segment '{0}' does not name a context value")]
    UnresolvableWildcard(String),
    #[error("step '{step}' references unknown path '{path}'")]
    MissingPath { step: String, path: String },
    #[error("step '{step}' matches no fields")]
    EmptyStep { step: String },
}

#[derive(Debug, Error)]
pub enum ExamError {
    #[error("section '{0}' is not available")]
    UnknownSection(String),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error("json encode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cbor encode error: {0}")]
    Cbor(#[from] serde_cbor::Error),
}
