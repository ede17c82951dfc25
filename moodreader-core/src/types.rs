use serde::{Deserialize, Serialize};

/// Reserved id for moods built from free-text input. Never part of the catalog.
pub const CUSTOM_MOOD_ID: &str = "custom";
pub const CUSTOM_MOOD_LABEL: &str = "Unique";
pub const CUSTOM_MOOD_EMOJI: &str = "💭";
pub const CUSTOM_MOOD_COLOR: &str = "bg-slate-50";

/// Label sent to the curator when a custom mood is first submitted.
pub const CUSTOM_MOOD_REQUEST_LABEL: &str = "custom mood";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoodId(pub String);

impl MoodId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn custom() -> Self {
        Self(CUSTOM_MOOD_ID.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_custom(&self) -> bool {
        self.0 == CUSTOM_MOOD_ID
    }
}

impl std::fmt::Display for MoodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub id: MoodId,
    pub label: String,
    pub emoji: String,
    pub color: String,
    pub description: String,
}

impl Mood {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        emoji: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: MoodId::new(id),
            label: label.into(),
            emoji: emoji.into(),
            color: color.into(),
            description: description.into(),
        }
    }

    /// Synthetic mood for free-text input. The caller is responsible for
    /// rejecting blank descriptions.
    pub fn custom(description: impl Into<String>) -> Self {
        Self {
            id: MoodId::custom(),
            label: CUSTOM_MOOD_LABEL.into(),
            emoji: CUSTOM_MOOD_EMOJI.into(),
            color: CUSTOM_MOOD_COLOR.into(),
            description: description.into(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id.is_custom()
    }

    pub fn collection_title(&self) -> String {
        if self.is_custom() {
            "A Personal Collection".into()
        } else {
            format!("The {} Collection", self.label)
        }
    }

    pub fn collection_tagline(&self) -> &'static str {
        if self.is_custom() {
            "Matched to your words"
        } else {
            "Curated Modern Gems"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: String,
    pub rating: String,
    pub summary: String,
    pub reason: String,
    pub isbn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationResponse {
    pub curator_note: String,
    pub books: Vec<Book>,
    pub links: Vec<GroundingLink>,
}

impl CurationResponse {
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.books.iter().map(|b| b.title.as_str())
    }
}
