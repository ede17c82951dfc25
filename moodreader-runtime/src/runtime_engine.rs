use std::sync::Arc;

use moodreader_core::config::AppConfig;
use moodreader_engine::client::GeminiCurator;
use moodreader_engine::controller::SessionController;
use moodreader_engine::traits::BookCurator;
use moodreader_providers::covers::{CoverAvailability, CoverLookup};
use moodreader_providers::gemini::GeminiConfig;
use moodreader_providers::runtime::{self, HttpSettings};

pub fn build_curator(cfg: &AppConfig, api_key: Option<String>) -> GeminiCurator {
    if api_key.is_none() {
        log::warn!("no Gemini API key set (GEMINI_API_KEY or API_KEY); requests will fail");
    }

    GeminiCurator::new(GeminiConfig {
        base_url: cfg.gemini.base_url.clone(),
        api_key: api_key.unwrap_or_default(),
        model: cfg.gemini.model.clone(),
    })
    .with_http_settings(HttpSettings::from(cfg.http))
}

/// Build a session controller backed by Gemini from config and credentials.
pub fn build_controller(cfg: &AppConfig, api_key: Option<String>) -> SessionController {
    let curator: Arc<dyn BookCurator> = Arc::new(build_curator(cfg, api_key));
    SessionController::new(curator)
}

pub fn build_cover_lookup(cfg: &AppConfig) -> CoverLookup {
    CoverLookup::new(cfg.covers.size)
}

/// Checks whether Open Library has a cover for `isbn`. Transport failures
/// come back as `Unknown`; they are never fatal.
pub async fn probe_cover(
    lookup: &CoverLookup,
    isbn: &str,
    http: &HttpSettings,
) -> CoverAvailability {
    let Some(req) = lookup.probe_request(isbn) else {
        return CoverAvailability::Missing;
    };

    match runtime::execute_with(&req, http).await {
        Ok(resp) => CoverAvailability::from_status(resp.status),
        Err(e) => {
            log::debug!("cover probe for {isbn} failed: {e:#}");
            CoverAvailability::Unknown
        }
    }
}
