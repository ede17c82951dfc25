use crate::types::{CUSTOM_MOOD_ID, Mood};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown mood: {0}")]
    UnknownMood(String),
    #[error("`{CUSTOM_MOOD_ID}` is reserved for free-text moods")]
    ReservedId,
}

// (id, label, emoji, color, description)
const MOODS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "joyful",
        "Joyful",
        "✨",
        "bg-amber-50",
        "Uplifting, light-hearted, and celebratory stories.",
    ),
    (
        "melancholy",
        "Melancholy",
        "🌧️",
        "bg-blue-50",
        "Poignant, reflective, and deeply emotional reads.",
    ),
    (
        "adventurous",
        "Adventurous",
        "🏔️",
        "bg-emerald-50",
        "Fast-paced quests and explorations of the unknown.",
    ),
    (
        "existential",
        "Existential",
        "🌌",
        "bg-indigo-50",
        "Philosophical, mind-bending, and life-questioning.",
    ),
    (
        "romantic",
        "Romantic",
        "🌹",
        "bg-rose-50",
        "Sweeping love stories and intimate connections.",
    ),
    (
        "anxious",
        "Restless",
        "🌀",
        "bg-purple-50",
        "Books to ground you or provide a gripping distraction.",
    ),
    (
        "pensive",
        "Pensive",
        "🕯️",
        "bg-stone-50",
        "Slow-burn, thoughtful, and atmospheric literature.",
    ),
    (
        "mysterious",
        "Mysterious",
        "🕵️",
        "bg-slate-50",
        "Intriguing puzzles and dark, hidden secrets.",
    ),
];

/// The fixed mood catalog, in display order.
pub fn mood_catalog() -> Vec<Mood> {
    MOODS
        .iter()
        .map(|(id, label, emoji, color, description)| {
            Mood::new(*id, *label, *emoji, *color, *description)
        })
        .collect()
}

pub fn find_mood(id: &str) -> Option<Mood> {
    let id = id.trim();
    mood_catalog()
        .into_iter()
        .find(|m| m.id.as_str().eq_ignore_ascii_case(id))
}

pub fn parse_mood(id: &str) -> Result<Mood, CatalogError> {
    if id.trim().eq_ignore_ascii_case(CUSTOM_MOOD_ID) {
        return Err(CatalogError::ReservedId);
    }
    find_mood(id).ok_or_else(|| CatalogError::UnknownMood(id.trim().to_string()))
}
