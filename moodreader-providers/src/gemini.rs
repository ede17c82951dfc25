use crate::request::{Body, HttpRequest};
use serde_json::{Value, json};

pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Output contract declared to the model: a curator note plus books with
/// exactly seven required string fields.
pub fn curation_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "curatorNote": {
                "type": "STRING",
                "description": "A soulful, poetic introduction to this collection based on the user's mood."
            },
            "books": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "author": { "type": "STRING" },
                        "year": { "type": "STRING" },
                        "rating": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "reason": { "type": "STRING", "description": "Why this book fits the mood." },
                        "isbn": { "type": "STRING", "description": "ISBN-13 without hyphens." }
                    },
                    "required": ["title", "author", "year", "rating", "summary", "reason", "isbn"]
                }
            }
        },
        "required": ["curatorNote", "books"]
    })
}

pub fn build_generate_content_request(cfg: &GeminiConfig, prompt: &str) -> HttpRequest {
    let url = join_url(
        &cfg.base_url,
        &format!("/models/{}:generateContent", cfg.model.trim()),
    );

    let payload = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }],
        }],
        // Search grounding lets the model cite sources; citations come back in
        // `groundingMetadata`.
        "tools": [{ "googleSearch": {} }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": curation_response_schema(),
        },
    });

    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            (API_KEY_HEADER.into(), cfg.api_key.clone()),
        ],
        body: Body::Json(payload.to_string()),
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
