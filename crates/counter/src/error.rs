use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CounterError>;

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid thread count: {0} (must be at least 1)")]
    InvalidThreadCount(usize),

    #[error("Cannot read {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}
