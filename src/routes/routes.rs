//! Defines routes for the gallery service.
//!
//! ## Structure
//! - **Gallery endpoints**
//!   - `POST /api/upload`         — multipart photo upload
//!   - `GET  /photos`             — sorted listing with example fallback
//!   - `GET  /uploads/{filename}` — stream stored image bytes
//!
//! - **Community endpoints**
//!   - `GET/POST /api/meetups`    — meetup (KDD) locations
//!   - `GET      /api/social`     — fixed social platform links
//!
//! Health endpoints (`/healthz`, `/readyz`) are mounted at root.

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        meetup_handlers::{add_meetup, list_meetups},
        photo_handlers::{get_upload, list_photos, upload_photo},
        social_handlers::list_social_platforms,
    },
    services::gallery::MAX_IMAGE_BYTES,
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Build and return the router for the whole service.
///
/// The router carries shared state (`AppState`) to all handlers. The body
/// limit sits above the 5 MiB image cap so oversized uploads reach the
/// validator and get its specific message instead of a generic 413.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // gallery
        .route("/api/upload", post(upload_photo))
        .route("/photos", get(list_photos))
        .route("/uploads/{filename}", get(get_upload))
        // community
        .route("/api/meetups", get(list_meetups).post(add_meetup))
        .route("/api/social", get(list_social_platforms))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 1024 * 1024))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        disk_storage::DiskStorage, gallery::GalleryService, metadata_store::MetadataStore,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "kddgallerytestboundary";

    fn app(dir: &TempDir) -> Router {
        let gallery = GalleryService::new(
            DiskStorage::new(dir.path().join("uploads")),
            MetadataStore::new(dir.path().join("uploads").join("metadata.json")),
        );
        routes().with_state(AppState::new(gallery))
    }

    /// Hand-rolled multipart body with an image part and optional text parts.
    fn multipart_body(
        image: Option<(&str, &str, &[u8])>,
        text_fields: &[(&str, &str)],
    ) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some((filename, content_type, data)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                     filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        for (name, value) in text_fields {
            body.extend_from_slice(
                format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                    .as_bytes(),
            );
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upload_round_trip_through_the_router() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let body = multipart_body(
            Some(("car.jpg", "image/jpeg", b"jpegdata")),
            &[("caption", "Camaro Rojo"), ("uploadedBy", "ana@example.com")],
        );
        let response = app.clone().oneshot(upload_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let uploaded = json_body(response).await;
        let url = uploaded["url"].as_str().unwrap().to_string();
        assert!(url.starts_with("/uploads/"));
        assert_eq!(uploaded["record"]["caption"], "Camaro Rojo");
        assert_eq!(uploaded["record"]["uploadedBy"], "ana@example.com");

        // The stored bytes come back from the public URL.
        let response = app
            .clone()
            .oneshot(Request::get(url.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"jpegdata");

        // And the listing now shows the real record, not the example set.
        let response = app
            .oneshot(Request::get("/photos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let photos = json_body(response).await;
        assert_eq!(photos.as_array().unwrap().len(), 1);
        assert_eq!(photos[0]["url"], url);
    }

    #[tokio::test]
    async fn upload_without_image_is_missing_file() {
        let dir = TempDir::new().unwrap();
        let body = multipart_body(None, &[("caption", "no image")]);
        let response = app(&dir).oneshot(upload_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No image file provided");
    }

    #[tokio::test]
    async fn upload_with_wrong_type_is_invalid_file_type() {
        let dir = TempDir::new().unwrap();
        let body = multipart_body(Some(("clip.gif", "image/gif", b"gifdata")), &[]);
        let response = app(&dir).oneshot(upload_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Invalid file type");
    }

    #[tokio::test]
    async fn oversized_upload_reports_the_size_limit() {
        let dir = TempDir::new().unwrap();
        let huge = vec![0u8; MAX_IMAGE_BYTES + 1];
        let body = multipart_body(Some(("big.png", "image/png", &huge)), &[]);
        let response = app(&dir).oneshot(upload_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "File size exceeds limit");
    }

    #[tokio::test]
    async fn empty_gallery_lists_the_example_set() {
        let dir = TempDir::new().unwrap();
        let response = app(&dir)
            .oneshot(Request::get("/photos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let photos = json_body(response).await;
        assert_eq!(photos.as_array().unwrap().len(), 4);
        assert_eq!(photos[0]["caption"], "Camaro Rojo ZL1");
    }

    #[tokio::test]
    async fn traversal_filename_is_rejected_on_the_uploads_route() {
        let dir = TempDir::new().unwrap();
        let response = app(&dir)
            .oneshot(
                Request::get("/uploads/..%2Fmetadata.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_upload_is_not_found() {
        let dir = TempDir::new().unwrap();
        let response = app(&dir)
            .oneshot(
                Request::get("/uploads/does-not-exist.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn meetups_start_seeded_and_accept_additions() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let response = app
            .clone()
            .oneshot(Request::get("/api/meetups").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 3);

        let new_meetup = serde_json::json!({
            "name": "Parking Valdecilla",
            "time": "Dom 11:00 AM",
            "description": "Café y coches.",
            "location": { "lat": 43.455, "lng": -3.828 }
        });
        let response = app
            .clone()
            .oneshot(
                Request::post("/api/meetups")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(new_meetup.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(Request::get("/api/meetups").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let meetups = json_body(response).await;
        assert_eq!(meetups.as_array().unwrap().len(), 4);
        assert_eq!(meetups[3]["name"], "Parking Valdecilla");
    }

    #[tokio::test]
    async fn social_listing_is_fixed() {
        let dir = TempDir::new().unwrap();
        let response = app(&dir)
            .oneshot(Request::get("/api/social").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let platforms = json_body(response).await;
        assert_eq!(platforms.as_array().unwrap().len(), 4);
        assert_eq!(platforms[0]["name"], "Instagram");
    }

    #[tokio::test]
    async fn health_probes_respond() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let response = app
            .clone()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn readyz_degrades_to_503_when_disk_is_unwritable() {
        let dir = TempDir::new().unwrap();
        // A regular file where the uploads directory should be makes the
        // disk write check fail.
        let uploads = dir.path().join("uploads");
        tokio::fs::write(&uploads, b"not a directory").await.unwrap();

        let gallery = GalleryService::new(
            DiskStorage::new(&uploads),
            MetadataStore::new(dir.path().join("metadata.json")),
        );
        let app = routes().with_state(AppState::new(gallery));

        let response = app
            .oneshot(Request::get("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["checks"]["disk"]["ok"], false);
    }
}
