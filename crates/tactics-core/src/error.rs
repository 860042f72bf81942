use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure loading the card catalogue
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalogue {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("No cards available in category '{0}'")]
    NoCardsAvailable(String),
}

/// Failure talking to the text generation service
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Request to text generator failed: {0}")]
    Transport(reqwest::Error),

    #[error("Text generator request timed out")]
    Timeout,

    #[error("Text generator rate limit exceeded")]
    RateLimited,

    #[error("Text generator returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed text generator response: {0}")]
    MalformedResponse(String),

    #[error("Text generator response contained no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GeneratorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeneratorError::Timeout
        } else {
            GeneratorError::Transport(e)
        }
    }
}

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Text generator unavailable: {0}")]
    CollaboratorUnavailable(#[from] GeneratorError),

    #[error("Text generator did not answer within {0:?}")]
    CollaboratorTimeout(Duration),
}
