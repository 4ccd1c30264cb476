//! Represents a community meetup (KDD) event shown on the map page.

use serde::{Deserialize, Serialize};

/// Geographical coordinates for a meetup spot.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A meetup event: a named place, a human-readable time, and a short
/// description. Coordinates arrive already resolved; geocoding happens
/// outside this service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Meetup {
    pub name: String,
    pub time: String,
    pub description: String,
    pub location: Location,
}

/// The seed list shown before anyone adds their own meetup.
pub fn seed_meetups() -> Vec<Meetup> {
    vec![
        Meetup {
            name: "Encuentro Sardinero Nocturno".into(),
            time: "Vie 9:00 PM".into(),
            description: "Reunión semanal en el parking de la playa.".into(),
            location: Location { lat: 43.473, lng: -3.78 },
        },
        Meetup {
            name: "Ruta Costera".into(),
            time: "Sáb 3:00 PM".into(),
            description: "Ruta panorámica por la costa oeste de Santander.".into(),
            location: Location { lat: 43.465, lng: -3.85 },
        },
        Meetup {
            name: "Polígono Candina Meet".into(),
            time: "Sáb 10:00 PM".into(),
            description: "Encuentro informal en zona industrial.".into(),
            location: Location { lat: 43.45, lng: -3.819 },
        },
    ]
}
