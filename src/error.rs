use thiserror::Error;

#[derive(Error, Debug)]
pub enum VeilError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Surface not supported by this context: {0}")]
    UnsupportedSurface(String),

    #[error("CDP connection failed: {0}")]
    CdpConnectionFailed(String),

    #[error("JavaScript injection failed: {0}")]
    JavaScriptError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VeilError>;
