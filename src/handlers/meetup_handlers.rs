//! Handlers for the meetup (KDD) location list.

use crate::{errors::AppError, models::meetup::Meetup, state::AppState};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// GET `/api/meetups` — the seeded list plus anything added this run.
pub async fn list_meetups(State(state): State<AppState>) -> Json<Vec<Meetup>> {
    Json(state.meetups.read().await.clone())
}

/// POST `/api/meetups` — add a meetup with pre-resolved coordinates.
pub async fn add_meetup(
    State(state): State<AppState>,
    Json(meetup): Json<Meetup>,
) -> Result<impl IntoResponse, AppError> {
    if meetup.name.trim().is_empty() {
        return Err(AppError::bad_request("meetup name must not be empty"));
    }

    let mut meetups = state.meetups.write().await;
    meetups.push(meetup.clone());
    Ok((StatusCode::CREATED, Json(meetup)))
}
