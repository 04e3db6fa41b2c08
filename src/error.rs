use thiserror::Error;

#[derive(Error, Debug)]
pub enum IssueDigestError {
    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid repository format: {0}")]
    InvalidRepository(String),

    #[error("Pagination exceeded: the API still advertised a next page after {max_pages} pages")]
    PaginationExceeded { max_pages: u32 },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IssueDigestError>;
