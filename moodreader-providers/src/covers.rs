use crate::request::HttpRequest;
use anyhow::Context;
use moodreader_core::config::CoverSize;
use moodreader_core::text::normalize_isbn;
use url::Url;

pub const OPEN_LIBRARY_COVERS_URL: &str = "https://covers.openlibrary.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverAvailability {
    Available,
    Missing,
    Unknown,
}

impl CoverAvailability {
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => CoverAvailability::Available,
            404 | 410 => CoverAvailability::Missing,
            _ => CoverAvailability::Unknown,
        }
    }
}

/// Builds Open Library cover URLs keyed by ISBN.
///
/// URLs are always "strict" (`default=false`): a missing cover answers 404
/// instead of a blank placeholder image, so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverLookup {
    base_url: Url,
    size: CoverSize,
}

impl CoverLookup {
    pub fn new(size: CoverSize) -> Self {
        Self {
            base_url: Url::parse(OPEN_LIBRARY_COVERS_URL).expect("valid covers base url"),
            size,
        }
    }

    pub fn with_base_url(base_url: &str, size: CoverSize) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid covers base url: {base_url}"))?;
        Ok(Self { base_url, size })
    }

    pub fn size(&self) -> CoverSize {
        self.size
    }

    /// `None` when the ISBN is blank after normalization.
    pub fn url_for(&self, isbn: &str) -> Option<Url> {
        let isbn = normalize_isbn(isbn);
        if isbn.is_empty() {
            return None;
        }

        let file = format!("{isbn}-{}.jpg", self.size.suffix());
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["b", "isbn", file.as_str()]);
        url.query_pairs_mut().append_pair("default", "false");
        Some(url)
    }

    pub fn probe_request(&self, isbn: &str) -> Option<HttpRequest> {
        let url = self.url_for(isbn)?;
        let mut req = HttpRequest::get(url.as_str());
        req.method = "HEAD".into();
        Some(req)
    }
}

impl Default for CoverLookup {
    fn default() -> Self {
        Self::new(CoverSize::default())
    }
}
