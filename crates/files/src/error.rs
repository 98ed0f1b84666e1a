use thiserror::Error;

pub type Result<T> = std::result::Result<T, FilesError>;

#[derive(Error, Debug)]
pub enum FilesError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Counter error: {0}")]
    CounterError(#[from] filetally_counter::CounterError),

    #[error("Invalid directory: {0}")]
    InvalidDirectory(String),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}
