//! HTTP handlers for the gallery: multipart upload, the sorted photo
//! listing, and streaming of stored image bytes. All storage and metadata
//! concerns are delegated to `GalleryService`.

use crate::{
    errors::AppError,
    models::photo::PhotoRecord,
    services::gallery::{NewUpload, UploadedPhoto},
    state::AppState,
};
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

/// POST `/api/upload` — multipart fields `image` (required), `caption` and
/// `uploadedBy` (optional). Returns 201 with the stored URL and the new
/// record.
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload = NewUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(format!("malformed multipart body: {}", err)))?
    {
        match field.name().unwrap_or_default() {
            "image" => {
                upload.content_type = field.content_type().map(str::to_string);
                upload.filename = field.file_name().map(str::to_string);
                upload.data = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::bad_request(format!("failed to read image: {}", err)))?;
            }
            "caption" => {
                upload.caption = Some(read_text_field(field, "caption").await?);
            }
            "uploadedBy" => {
                let identity = read_text_field(field, "uploadedBy").await?;
                if !identity.trim().is_empty() {
                    upload.uploaded_by = Some(identity);
                }
            }
            // Unknown fields are ignored, matching lenient form handling.
            _ => {}
        }
    }

    let uploaded: UploadedPhoto = state.gallery.upload(upload).await?;
    Ok((StatusCode::CREATED, Json(uploaded)))
}

/// GET `/photos` — every record, newest first, with the example fallback
/// when the collection is empty.
pub async fn list_photos(State(state): State<AppState>) -> Json<Vec<PhotoRecord>> {
    Json(state.gallery.list_photos().await)
}

/// GET `/uploads/{filename}` — stream a stored image back out.
pub async fn get_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let (file, len) = state.gallery.storage().open(&filename).await?;

    let mut response = Response::new(Body::from_stream(ReaderStream::new(file)));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_for(&filename)),
    );
    if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
        headers.insert(header::CONTENT_LENGTH, value);
    }
    Ok(response)
}

/// Stored filenames carry the extension chosen at upload time, so the
/// content type can be recovered from the name alone.
fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            "image/jpeg"
        }
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        Some(ext) if ext.eq_ignore_ascii_case("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|err| AppError::bad_request(format!("failed to read {} field: {}", name, err)))
}
