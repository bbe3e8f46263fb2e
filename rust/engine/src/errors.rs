use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("invalid pack configuration: {reason}")]
    InvalidConfiguration { reason: String },
}
