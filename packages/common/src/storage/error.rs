use std::path::PathBuf;

/// Failure of a [`FileStore`](super::FileStore) operation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The name would place the file outside the storage directory.
    #[error("invalid file name: {0}")]
    InvalidName(String),
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
