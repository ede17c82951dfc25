use moodreader_core::types::{CurationResponse, Mood};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Selection,
    Loading,
    Results,
}

/// View state, carrying only the data that is valid in each view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Selection {
        /// Reason the last first-time curation failed, if any.
        error: Option<String>,
    },
    Loading {
        mood: Mood,
        /// Results kept on screen while a refresh is in flight.
        retained: Option<CurationResponse>,
    },
    Results {
        mood: Mood,
        recommendations: CurationResponse,
        /// Set when a refresh failed; `recommendations` is the previous set.
        error: Option<String>,
    },
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Selection { error: None }
    }
}

impl ViewState {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewState::Selection { .. } => ViewKind::Selection,
            ViewState::Loading { .. } => ViewKind::Loading,
            ViewState::Results { .. } => ViewKind::Results,
        }
    }

    pub fn selected_mood(&self) -> Option<&Mood> {
        match self {
            ViewState::Selection { .. } => None,
            ViewState::Loading { mood, .. } | ViewState::Results { mood, .. } => Some(mood),
        }
    }

    /// The recommendations currently on display. During a refresh these are
    /// the retained previous results.
    pub fn recommendations(&self) -> Option<&CurationResponse> {
        match self {
            ViewState::Selection { .. } => None,
            ViewState::Loading { retained, .. } => retained.as_ref(),
            ViewState::Results {
                recommendations, ..
            } => Some(recommendations),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Selection { error } | ViewState::Results { error, .. } => error.as_deref(),
            ViewState::Loading { .. } => None,
        }
    }
}

/// Titles shown so far this session, in the order they were shown.
///
/// Append-only until cleared. No deduplication: a title the model repeats is
/// recorded again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShownTitles(Vec<String>);

impl ShownTitles {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn replace_with(&mut self, resp: &CurationResponse) {
        self.0.clear();
        self.append(resp);
    }

    pub(crate) fn append(&mut self, resp: &CurationResponse) {
        self.0.extend(resp.titles().map(str::to_string));
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub(crate) view: ViewState,
    pub(crate) shown_titles: ShownTitles,
    pub(crate) custom_input: String,
}

impl Session {
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn kind(&self) -> ViewKind {
        self.view.kind()
    }

    pub fn selected_mood(&self) -> Option<&Mood> {
        self.view.selected_mood()
    }

    pub fn recommendations(&self) -> Option<&CurationResponse> {
        self.view.recommendations()
    }

    pub fn error(&self) -> Option<&str> {
        self.view.error()
    }

    pub fn shown_titles(&self) -> &[String] {
        self.shown_titles.as_slice()
    }

    pub fn custom_input(&self) -> &str {
        &self.custom_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_response;

    #[test]
    fn default_session_is_empty_selection() {
        let s = Session::default();
        assert_eq!(s.kind(), ViewKind::Selection);
        assert!(s.selected_mood().is_none());
        assert!(s.recommendations().is_none());
        assert!(s.error().is_none());
        assert!(s.shown_titles().is_empty());
        assert_eq!(s.custom_input(), "");
    }

    #[test]
    fn loading_exposes_retained_results() {
        let mood = Mood::custom("quiet");
        let view = ViewState::Loading {
            mood: mood.clone(),
            retained: Some(sample_response("Old", 2)),
        };
        assert_eq!(view.kind(), ViewKind::Loading);
        assert_eq!(view.selected_mood(), Some(&mood));
        assert_eq!(view.recommendations().unwrap().books.len(), 2);
        assert_eq!(view.error(), None);
    }

    #[test]
    fn shown_titles_append_keeps_duplicates() {
        let mut titles = ShownTitles::default();
        titles.replace_with(&sample_response("A", 2));
        titles.append(&sample_response("A", 1));
        assert_eq!(titles.as_slice(), &["A 1", "A 2", "A 1"]);

        titles.replace_with(&sample_response("B", 1));
        assert_eq!(titles.as_slice(), &["B 1"]);

        titles.clear();
        assert!(titles.is_empty());
    }

    #[test]
    fn view_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ViewKind::Results).unwrap(),
            "\"results\""
        );
    }
}
