use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::BufReader;

use super::error::StorageError;
use super::traits::{BoxReader, FileStore};

/// Filesystem-backed file store.
///
/// Files live flat under `base_path`. Writes go through a temp file in the
/// same directory and are renamed into place, so readers never observe a
/// half-written file.
pub struct FilesystemFileStore {
    base_path: PathBuf,
}

impl FilesystemFileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join(format!(".{}.tmp", uuid::Uuid::new_v4()))
    }
}

fn validate_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl FileStore for FilesystemFileStore {
    async fn put(&self, name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        validate_name(name)?;

        if fs::metadata(&self.base_path).await.is_err() {
            tracing::info!(dir = %self.base_path.display(), "Creating storage directory");
            fs::create_dir_all(&self.base_path).await?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        let target = self.base_path.join(name);
        if let Err(e) = fs::rename(&temp_path, &target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(target)
    }

    async fn open(&self, path: &Path) -> Result<(BoxReader, u64), StorageError> {
        let file = match fs::File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let size = file.metadata().await?.len();
        let reader: BoxReader = Box::new(BufReader::new(file));
        Ok((reader, size))
    }

    async fn remove(&self, path: &Path) -> Result<bool, StorageError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
