//! GalleryService — the upload pipeline and the gallery listing.
//!
//! An upload is validated, its bytes are handed to [`DiskStorage`], and only
//! after the binary is durably stored is a [`PhotoRecord`] appended to the
//! [`MetadataStore`]. Storage success is a hard precondition for the append:
//! a storage failure leaves no metadata behind, while a metadata failure
//! leaves an orphaned binary that is logged and kept (no rollback).

use crate::{
    models::photo::{PhotoRecord, example_photos},
    services::{
        disk_storage::{DiskStorage, StorageError},
        metadata_store::{MetadataError, MetadataStore},
    },
};
use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Upper bound on image payload size (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Upper bound on caption length, in characters.
pub const MAX_CAPTION_CHARS: usize = 150;

const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No image file provided")]
    MissingFile,
    #[error("Invalid file type")]
    InvalidType,
    #[error("File size exceeds limit")]
    FileTooLarge,
    #[error("Caption exceeds {MAX_CAPTION_CHARS} characters")]
    CaptionTooLong,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl UploadError {
    /// Whether the error is the client's fault (maps to HTTP 400).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingFile | Self::InvalidType | Self::FileTooLarge | Self::CaptionTooLong
        )
    }
}

/// One incoming upload, as extracted from the multipart request.
#[derive(Debug, Default)]
pub struct NewUpload {
    pub data: Bytes,
    pub content_type: Option<String>,
    /// Client-side filename, only consulted for its extension.
    pub filename: Option<String>,
    pub caption: Option<String>,
    /// Submitter identity resolved at the HTTP boundary; `None` when the
    /// upload is anonymous.
    pub uploaded_by: Option<String>,
}

/// Successful upload result returned to the handler.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadedPhoto {
    pub url: String,
    pub record: PhotoRecord,
}

#[derive(Clone, Debug)]
pub struct GalleryService {
    storage: DiskStorage,
    metadata: MetadataStore,
}

impl GalleryService {
    pub fn new(storage: DiskStorage, metadata: MetadataStore) -> Self {
        Self { storage, metadata }
    }

    pub fn storage(&self) -> &DiskStorage {
        &self.storage
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Validate the upload without touching storage or metadata.
    ///
    /// Rules apply in order and short-circuit on the first failure.
    fn validate(upload: &NewUpload) -> Result<(), UploadError> {
        if upload.data.is_empty() {
            return Err(UploadError::MissingFile);
        }

        let content_type = upload.content_type.as_deref().unwrap_or("");
        if !ALLOWED_IMAGE_TYPES
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
        {
            return Err(UploadError::InvalidType);
        }

        if upload.data.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::FileTooLarge);
        }

        if let Some(caption) = &upload.caption {
            if caption.chars().count() > MAX_CAPTION_CHARS {
                return Err(UploadError::CaptionTooLong);
            }
        }

        Ok(())
    }

    /// Extension for the stored filename, taken from the client filename
    /// with `jpg` as the fallback.
    fn stored_extension(upload: &NewUpload) -> String {
        upload
            .filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext))
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "jpg".to_string())
    }

    /// Run the full upload pipeline: validate, store, append.
    pub async fn upload(&self, upload: NewUpload) -> Result<UploadedPhoto, UploadError> {
        Self::validate(&upload)?;

        let filename = format!("{}.{}", Uuid::new_v4(), Self::stored_extension(&upload));
        let url = self.storage.store(&filename, &upload.data).await?;

        let caption = upload.caption.unwrap_or_default();
        let alt = if caption.is_empty() {
            format!("Uploaded image {}", filename)
        } else {
            caption.clone()
        };

        let record = PhotoRecord {
            id: Uuid::new_v4(),
            url: url.clone(),
            alt,
            caption,
            uploaded_at: Utc::now(),
            uploaded_by: upload.uploaded_by,
        };

        if let Err(err) = self.metadata.append(record.clone()).await {
            // The binary stays where it is; the record for it was never
            // written, so the file is an orphan from here on.
            warn!(
                "metadata append failed after storing {}: {} (orphaned binary kept)",
                filename, err
            );
            return Err(err.into());
        }

        info!("uploaded {} ({} bytes)", url, upload.data.len());
        Ok(UploadedPhoto { url, record })
    }

    /// Gallery listing: all records newest-first, or the example set when
    /// the collection is empty.
    ///
    /// Appends land in arrival order, not time order, so the sort happens
    /// here at read time. The sort is stable: records sharing a timestamp
    /// keep their collection order.
    pub async fn list_photos(&self) -> Vec<PhotoRecord> {
        let mut photos = self.metadata.read_all().await;
        if photos.is_empty() {
            return example_photos();
        }
        photos.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        photos
    }
}
