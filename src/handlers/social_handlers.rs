//! Handler for the fixed social-platform links shown on the community page.

use axum::Json;
use serde::Serialize;

#[derive(Serialize, Clone)]
pub struct SocialPlatform {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

/// GET `/api/social` — the community's social media presence.
pub async fn list_social_platforms() -> Json<Vec<SocialPlatform>> {
    Json(vec![
        SocialPlatform {
            name: "Instagram",
            url: "https://www.instagram.com/undergroundrace_/",
            description: "Detrás de cámaras, destacados de eventos y features de la comunidad.",
        },
        SocialPlatform {
            name: "YouTube",
            url: "https://www.youtube.com/@Underground_Race",
            description: "Documentales completos, entrevistas exclusivas y contenido extendido.",
        },
        SocialPlatform {
            name: "Twitter",
            url: "https://x.com/undergrace_1",
            description: "Actualizaciones rápidas, noticias breves y cobertura de eventos en vivo.",
        },
        SocialPlatform {
            name: "TikTok",
            url: "https://www.tiktok.com/@_underground_race?lang=es",
            description: "Clips cortos, momentos del making-of y contenido de tendencia.",
        },
    ])
}
