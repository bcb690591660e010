use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("other error: {0}")]
    Other(String),
}
