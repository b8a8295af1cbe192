use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid UUID format: {0}")]
    InvalidUuid(String),

    #[error("invalid memory value: {0} (must be between 500 and 500000 MB)")]
    InvalidMemory(String),

    #[error("invalid power state '{0}'. <ON, OFF>")]
    InvalidPowerState(String),

    #[error("{0}")]
    Validation(String),

    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("profile '{name}' not found at {}", .path.display())]
    ProfileNotFound { name: String, path: PathBuf },

    #[error("profile '{name}' already exists at {} (use --force to overwrite)", .path.display())]
    ProfileExists { name: String, path: PathBuf },

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("HTTP {status} from {url}: {body}")]
    Api {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("unexpected response from {url}: {reason}")]
    UnexpectedResponse { url: String, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("could not read terminal input: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl CliError {
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::Validation(message.into())
    }
}
