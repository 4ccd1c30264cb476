//! Represents one uploaded gallery photo.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for a single uploaded image.
///
/// A record describes a stored photo, not its content bytes. Records are
/// persisted together as one JSON array document, field names in camelCase
/// to match the on-disk format.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Unique identifier, generated at creation and immutable.
    pub id: Uuid,

    /// Public URL path of the stored binary (e.g. `/uploads/{filename}`).
    pub url: String,

    /// Fallback display text; defaults to the caption or a generated
    /// placeholder naming the stored file.
    pub alt: String,

    /// Free-text caption, at most 150 characters. Empty when none was given.
    pub caption: String,

    /// When the record was appended.
    pub uploaded_at: DateTime<Utc>,

    /// Submitter identity (display name or e-mail), `None` when the upload
    /// was anonymous. Omitted from the document when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
}

/// Fixed presentation fallback shown when the gallery is empty.
///
/// These are never persisted; the gallery substitutes them at read time only.
pub fn example_photos() -> Vec<PhotoRecord> {
    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    vec![
        PhotoRecord {
            id: Uuid::parse_str("1638e2d5-2930-4e5b-8276-a9456c7609d4").unwrap(),
            url: "/uploads/40ca4bc5-a242-4584-9ed2-71fa63e5b0b1.jpg".into(),
            alt: "Camaro Rojo".into(),
            caption: "Camaro Rojo ZL1".into(),
            uploaded_at: at(2025, 5, 5, 21, 46, 18),
            uploaded_by: None,
        },
        PhotoRecord {
            id: Uuid::parse_str("d852dbb3-f604-4c7c-813b-520e6549235a").unwrap(),
            url: "/uploads/a882e851-eae5-49b2-88c0-b97a679a4d3f.jpg".into(),
            alt: "Porsche Negro Clásico".into(),
            caption: "Porsche 911 Turbo Clásico".into(),
            uploaded_at: at(2025, 5, 5, 21, 46, 41),
            uploaded_by: None,
        },
        PhotoRecord {
            id: Uuid::parse_str("3a5c73b7-9d77-48e4-8409-cceb1708c386").unwrap(),
            url: "/uploads/d5e9fdc1-afd7-4acd-a49b-d812332fcb15.jpg".into(),
            alt: "BMW M3 Azul".into(),
            caption: "BMW M3 Competición Azul".into(),
            uploaded_at: at(2025, 5, 5, 21, 40, 54),
            uploaded_by: None,
        },
        PhotoRecord {
            id: Uuid::parse_str("63b2d351-31f9-4d31-a609-eee347d8043a").unwrap(),
            url: "/uploads/747c3356-8eb0-42f0-9c18-891a26b28ac7.jpg".into(),
            alt: "Nissan GT-R Blanco".into(),
            caption: "Nissan GT-R Nismo Blanco".into(),
            uploaded_at: at(2025, 5, 5, 21, 41, 4),
            uploaded_by: None,
        },
    ]
}
