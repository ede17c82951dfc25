use crate::error::{CurationError, RECOMMENDATION_FAILURE_MESSAGE};
use crate::traits::BookCurator;
use anyhow::anyhow;
use moodreader_core::prompt::build_curation_prompt;
use moodreader_core::types::CurationResponse;
use moodreader_providers::gemini::{GeminiConfig, build_generate_content_request};
use moodreader_providers::parse::{parse_curation_payload, parse_generate_content};
use moodreader_providers::runtime::{self, HttpSettings};

/// Recommendation service client backed by Gemini `generateContent`.
///
/// No retries: a failed call is reported once and the caller decides.
// Debug output is key-free: `GeminiConfig` redacts it.
#[derive(Debug, Clone)]
pub struct GeminiCurator {
    config: GeminiConfig,
    http: HttpSettings,
}

impl GeminiCurator {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: HttpSettings::default(),
        }
    }

    pub fn with_http_settings(mut self, http: HttpSettings) -> Self {
        self.http = http;
        self
    }

    async fn request_curation(
        &self,
        mood_label: &str,
        description: &str,
        exclude_titles: &[String],
    ) -> anyhow::Result<CurationResponse> {
        let prompt = build_curation_prompt(mood_label, description, exclude_titles);
        let req = build_generate_content_request(&self.config, &prompt);
        log::debug!("curation request: {req:?}");

        let resp = runtime::execute_with(&req, &self.http).await?;
        if !resp.is_success() {
            return Err(anyhow!(
                "Gemini request failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body)
            ));
        }

        let generated = parse_generate_content(&resp.body)?;
        let payload = parse_curation_payload(generated.text.as_deref())?;

        if payload.dropped_entries > 0 {
            log::warn!(
                "dropped {} malformed book entries from curation response",
                payload.dropped_entries
            );
        }
        if payload.books.is_empty() {
            log::warn!("curation response contained no books");
        }

        Ok(CurationResponse {
            curator_note: payload.curator_note,
            books: payload.books,
            links: generated.links,
        })
    }
}

#[async_trait::async_trait]
impl BookCurator for GeminiCurator {
    async fn curate(
        &self,
        mood_label: &str,
        description: &str,
        exclude_titles: &[String],
    ) -> Result<CurationResponse, CurationError> {
        self.request_curation(mood_label, description, exclude_titles)
            .await
            .map_err(|e| {
                log::error!("curation request failed: {e:#}");
                CurationError::recommendation_failure(RECOMMENDATION_FAILURE_MESSAGE)
            })
    }
}
