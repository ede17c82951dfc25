use anyhow::{Context, anyhow};
use moodreader_core::text::strip_code_fence;
use moodreader_core::types::{Book, GroundingLink};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_CURATOR_NOTE: &str = "Here are some books for your mood.";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,

    // Kept loose: citations are optional and must never fail the response.
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// The useful parts of a `generateContent` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    /// Concatenated text parts of the first candidate, if any.
    pub text: Option<String>,
    pub links: Vec<GroundingLink>,
}

pub fn parse_generate_content(body: &[u8]) -> anyhow::Result<GeneratedContent> {
    let resp: GenerateContentResponse =
        serde_json::from_slice(body).context("decode generateContent JSON")?;

    if let Some(err) = resp.error {
        return Err(anyhow!(
            "Gemini API error: code={} status={} message={}",
            err.code.map(|c| c.to_string()).unwrap_or_else(|| "?".into()),
            err.status.as_deref().unwrap_or("?"),
            err.message
        ));
    }

    let Some(first) = resp.candidates.into_iter().next() else {
        return Ok(GeneratedContent {
            text: None,
            links: vec![],
        });
    };

    let text: String = first
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    Ok(GeneratedContent {
        text: if text.is_empty() { None } else { Some(text) },
        links: extract_grounding_links(first.grounding_metadata.as_ref()),
    })
}

/// Keeps only web citations with a usable uri. A chunk without a title is
/// labelled by its uri.
pub fn extract_grounding_links(metadata: Option<&Value>) -> Vec<GroundingLink> {
    let Some(chunks) = metadata
        .and_then(|m| m.get("groundingChunks"))
        .and_then(Value::as_array)
    else {
        return vec![];
    };

    chunks
        .iter()
        .filter_map(|chunk| chunk.get("web"))
        .filter_map(|web| {
            let uri = web.get("uri").and_then(Value::as_str)?.trim();
            if uri.is_empty() {
                return None;
            }
            let title = web
                .get("title")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(uri);
            Some(GroundingLink {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationPayload {
    pub curator_note: String,
    pub books: Vec<Book>,
    /// Entries of `books` that were not objects and got skipped.
    pub dropped_entries: usize,
}

/// Decodes the model's JSON text into a note and book list.
///
/// Missing or empty text is read as `{}`. Anything that is valid JSON
/// degrades to defaults field by field; only text that is not JSON at all is
/// an error.
pub fn parse_curation_payload(text: Option<&str>) -> anyhow::Result<CurationPayload> {
    let raw = text.map(strip_code_fence).filter(|t| !t.is_empty()).unwrap_or("{}");
    let data: Value = serde_json::from_str(raw).context("decode curation JSON")?;

    let curator_note = data
        .get("curatorNote")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_CURATOR_NOTE)
        .to_string();

    let entries = data
        .get("books")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let books: Vec<Book> = entries
        .iter()
        .filter_map(Value::as_object)
        .map(book_from_object)
        .collect();

    Ok(CurationPayload {
        curator_note,
        dropped_entries: entries.len() - books.len(),
        books,
    })
}

fn book_from_object(obj: &Map<String, Value>) -> Book {
    Book {
        title: string_field(obj, "title"),
        author: string_field(obj, "author"),
        year: string_field(obj, "year"),
        rating: string_field(obj, "rating"),
        summary: string_field(obj, "summary"),
        reason: string_field(obj, "reason"),
        isbn: string_field(obj, "isbn"),
    }
}

// Years and ratings sometimes arrive as numbers despite the schema.
fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
