//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks disk I/O and the metadata document

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;
use tokio::fs;
use uuid::Uuid;

/// `GET /healthz`
///
/// Very small liveness probe — always returns 200 OK with a plain JSON body.
/// This endpoint should be cheap and never perform I/O.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// Readiness probe that:
/// 1. Performs a best-effort write/read/delete under the uploads directory.
/// 2. Checks the metadata document parses (or is absent, which is fine).
///
/// Returns JSON describing each check. HTTP 200 when all checks pass,
/// HTTP 503 when any check fails.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let storage = state.gallery.storage();

    // 1) Disk write/read/delete check (use a temp file under the uploads dir)
    let tmp_path = storage.base_path.join(format!(".readyz-{}", Uuid::new_v4()));
    let disk_check = match fs::create_dir_all(&storage.base_path).await {
        Err(e) => (false, Some(format!("could not create uploads dir: {}", e))),
        Ok(_) => match fs::write(&tmp_path, b"readyz").await {
            Ok(_) => match fs::read(&tmp_path).await {
                Ok(bytes) => {
                    if bytes == b"readyz" {
                        // try to remove the temp file; ignore removal error but report it
                        match fs::remove_file(&tmp_path).await {
                            Ok(_) => (true, None::<String>),
                            Err(e) => (true, Some(format!("could not remove tmp file: {}", e))),
                        }
                    } else {
                        let _ = fs::remove_file(&tmp_path).await; // best-effort cleanup
                        (false, Some("file content mismatch".to_string()))
                    }
                }
                Err(e) => {
                    let _ = fs::remove_file(&tmp_path).await; // best-effort cleanup
                    (false, Some(format!("could not read tmp file: {}", e)))
                }
            },
            Err(e) => (false, Some(format!("could not write tmp file: {}", e))),
        },
    };

    // 2) Metadata document check. An absent or malformed document reads as
    // empty by contract, so this can only report degraded, never fail.
    let metadata_path = state.gallery.metadata().path();
    let metadata_check = match fs::read_to_string(metadata_path).await {
        Ok(raw) => match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(_) => (true, None::<String>),
            Err(e) => (true, Some(format!("document malformed, reads as empty: {}", e))),
        },
        Err(_) => (true, Some("document absent, reads as empty".to_string())),
    };

    let disk_ok = disk_check.0;
    let metadata_ok = metadata_check.0;
    let overall_ok = disk_ok && metadata_ok;

    let mut checks = HashMap::new();
    checks.insert(
        "disk",
        CheckStatus {
            ok: disk_ok,
            error: disk_check.1,
        },
    );
    checks.insert(
        "metadata",
        CheckStatus {
            ok: metadata_ok,
            error: metadata_check.1,
        },
    );

    let body = ReadyResponse {
        status: if overall_ok {
            "ok".into()
        } else {
            "error".into()
        },
        checks,
    };

    let status = if overall_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}
