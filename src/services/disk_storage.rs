//! DiskStorage — the local storage backend for image payloads.
//!
//! Stores each upload under `base_path/{filename}` and hands back the public
//! URL path `/uploads/{filename}`. Writes go through a temp file with fsync
//! and an atomic rename so a crash mid-upload never leaves a half-written
//! image at a public URL.

use bytes::Bytes;
use std::{
    io::{self, ErrorKind},
    path::PathBuf,
};
use thiserror::Error;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid stored filename")]
    InvalidFilename,
    #[error("stored file `{0}` not found")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend rooted at one uploads directory.
#[derive(Clone, Debug)]
pub struct DiskStorage {
    /// Directory on disk where image payloads live.
    pub base_path: PathBuf,
}

impl DiskStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Reject filenames that could escape the uploads directory.
    ///
    /// Stored names are UUID-based so anything with a separator or `..`
    /// only ever arrives from a hostile request path.
    fn ensure_filename_safe(&self, filename: &str) -> StorageResult<()> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
            || filename.bytes().any(|b| b.is_ascii_control())
        {
            return Err(StorageError::InvalidFilename);
        }
        Ok(())
    }

    fn file_path(&self, filename: &str) -> PathBuf {
        self.base_path.join(filename)
    }

    /// Persist image bytes under `filename` and return the public URL path.
    ///
    /// The bytes land in a temp file first, are fsynced, then renamed into
    /// place. On any failure the temp file is removed and no public URL
    /// exists for the payload.
    pub async fn store(&self, filename: &str, data: &Bytes) -> StorageResult<String> {
        self.ensure_filename_safe(filename)?;
        fs::create_dir_all(&self.base_path).await?;

        let final_path = self.file_path(filename);
        let tmp_path = self.base_path.join(format!(".tmp-{}", Uuid::new_v4()));
        let mut file = File::create(&tmp_path).await?;

        if let Err(err) = file.write_all(data).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(err));
        }
        if let Err(err) = file.sync_all().await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(err));
        }
        if let Err(err) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(err));
        }

        debug!("stored {} bytes at {}", data.len(), final_path.display());
        Ok(format!("/uploads/{}", filename))
    }

    /// Open a stored file for streaming out, together with its size.
    pub async fn open(&self, filename: &str) -> StorageResult<(File, u64)> {
        self.ensure_filename_safe(filename)?;
        let path = self.file_path(filename);
        let file = File::open(&path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StorageError::NotFound(filename.to_string())
            } else {
                StorageError::Io(err)
            }
        })?;
        let len = file.metadata().await?.len();
        Ok((file, len))
    }

}
