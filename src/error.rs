use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unauthorized: GitHub rejected the credential (check your token)")]
    Unauthorized,

    #[error("forbidden or rate limited by the GitHub API (try supplying a token)")]
    Forbidden,

    #[error("repository not found or private (check your token)")]
    NotFound,

    #[error("GitHub API returned HTTP {status}")]
    Http { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(
        "timed out after {attempts} attempts waiting for GitHub to compute contributor statistics"
    )]
    PollTimeout { attempts: u32 },

    #[error("credential contains characters not allowed in an HTTP header")]
    InvalidCredential,

    #[error("invalid repository identifier: {0}")]
    InvalidRepository(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
