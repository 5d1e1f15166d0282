#[derive(Debug, thiserror::Error)]
pub enum NavigatorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to serialize report: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize report: {0}")]
    Deserialization(serde_json::Error),
}

pub type NavigatorResult<T> = std::result::Result<T, NavigatorError>;
