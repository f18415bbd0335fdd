use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Connection error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Error {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
