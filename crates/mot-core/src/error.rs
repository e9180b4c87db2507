use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing API token: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl MotError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

pub type Result<T> = std::result::Result<T, MotError>;
