use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameSwapError {
    #[error("No headers found")]
    NoHeaders,

    #[error("No name columns to modify")]
    NoTargetColumns,

    #[error("Session file not found: {0}")]
    SessionNotFound(PathBuf),

    #[error("Malformed session file {path}: {reason}")]
    SessionMalformed { path: PathBuf, reason: String },

    #[error("Session file is not valid UTF-8: {0}")]
    SessionEncoding(PathBuf),

    #[error("Failed to write session file {path}: {source}")]
    SessionWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, NameSwapError>;
