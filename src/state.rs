//! Shared application state handed to every handler.

use crate::{
    models::meetup::{Meetup, seed_meetups},
    services::gallery::GalleryService,
};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub gallery: GalleryService,

    /// In-memory meetup list, seeded at startup. Meetups are ephemeral by
    /// design; only photo metadata is persisted.
    pub meetups: Arc<RwLock<Vec<Meetup>>>,
}

impl AppState {
    pub fn new(gallery: GalleryService) -> Self {
        Self {
            gallery,
            meetups: Arc::new(RwLock::new(seed_meetups())),
        }
    }
}
