// Error taxonomy for the setup pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Every failure is fatal: the binary prints the message once and exits 1.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Missing credentials file: {}\n  Create it with: {{ \"api_key\": \"mm_xxx\", \"user_id\": \"uuid\", \"username\": \"xxx\" }}", .path.display())]
    MissingCredentials { path: PathBuf },

    #[error("API returned {status}: {body}")]
    ApiRejected { status: u16, body: String },

    #[error("Request to MoltMarkets API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON in {context}: {source}")]
    MalformedJson {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SetupError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        SetupError::Io { context: context.into(), source }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        SetupError::MalformedJson { context: context.into(), source }
    }
}

pub type SetupResult<T> = std::result::Result<T, SetupError>;
