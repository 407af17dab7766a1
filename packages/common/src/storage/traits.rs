use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Named file storage rooted at a single directory.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `data` under `name`, replacing any previous file with that name.
    ///
    /// The storage directory is created when missing. Returns the path the
    /// file was written to.
    async fn put(&self, name: &str, data: &[u8]) -> Result<PathBuf, StorageError>;

    /// Open a previously stored file as a streaming reader, along with its
    /// current size in bytes.
    async fn open(&self, path: &Path) -> Result<(BoxReader, u64), StorageError>;

    /// Delete a stored file.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn remove(&self, path: &Path) -> Result<bool, StorageError>;
}
