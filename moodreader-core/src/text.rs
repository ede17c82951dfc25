use regex::Regex;
use std::sync::OnceLock;

fn code_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Grounded generations sometimes wrap JSON in a Markdown fence even when
        // a JSON mime type was requested.
        Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\r?\n?\s*```\s*$")
            .expect("valid code fence regex")
    })
}

fn isbn_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\-]+").expect("valid isbn separator regex"))
}

/// Returns the trimmed input, or `None` when nothing but whitespace is left.
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Strips a single surrounding Markdown code fence, if present.
pub fn strip_code_fence(text: &str) -> &str {
    match code_fence_re().captures(text).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => text.trim(),
    }
}

/// ISBNs come back from the model with hyphens or spaces now and then.
pub fn normalize_isbn(isbn: &str) -> String {
    isbn_separator_re().replace_all(isbn.trim(), "").to_string()
}
