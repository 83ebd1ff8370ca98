use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("ID not found")]
    NotFound,

    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] timesketch::InvalidParameters),
}
