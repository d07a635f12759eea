use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum YouTrackError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("YouTrack returned status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No token found. Pass --token, set YOUTRACK_TOKEN or add token to ~/.config/youtrack/config.toml"
    )]
    MissingToken,

    #[error("Token contains characters that cannot be sent in an HTTP header")]
    InvalidToken,

    #[error("Invalid issue id: {0:?}")]
    InvalidIssueId(String),

    #[error("Invalid tag name {0:?}: tags cannot contain '{{' or '}}'")]
    InvalidTag(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl YouTrackError {
    /// HTTP status carried by a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            YouTrackError::Remote { status, .. } => Some(*status),
            YouTrackError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, YouTrackError>;
