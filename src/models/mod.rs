//! Core data models for the gallery service.
//!
//! These entities describe uploaded photos and meetup events. They serialize
//! naturally as JSON via `serde`, matching the persisted metadata document
//! and the HTTP responses field-for-field.

pub mod meetup;
pub mod photo;
