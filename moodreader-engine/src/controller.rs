use crate::error::CurationError;
use crate::session::{Session, ViewKind, ViewState};
use crate::traits::BookCurator;
use moodreader_core::text::non_blank;
use moodreader_core::types::{CUSTOM_MOOD_REQUEST_LABEL, CurationResponse, Mood};
use std::sync::Arc;
use uuid::Uuid;

pub const SELECTION_FAILURE_FALLBACK: &str = "Something went wrong while curating your books.";
pub const REFRESH_FAILURE_FALLBACK: &str = "Something went wrong while refreshing your books.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// First curation for a freshly selected or submitted mood.
    Initial,
    Refresh,
}

/// Side effects the front end should perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    ScrollToTop,
}

/// A curator call prepared by one of the `begin_*` steps.
///
/// The exclusion list is captured when the request is built, so it is the
/// full accumulated list at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationRequest {
    kind: RequestKind,
    mood: Mood,
    mood_label: String,
    description: String,
    exclude_titles: Vec<String>,
}

impl CurationRequest {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn mood(&self) -> &Mood {
        &self.mood
    }

    pub fn mood_label(&self) -> &str {
        &self.mood_label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn exclude_titles(&self) -> &[String] {
        &self.exclude_titles
    }
}

/// Drives one browsing session: mood selection, curation, refresh and reset.
///
/// Every mutating call takes `&mut self`, so at most one curator call is in
/// flight per controller.
pub struct SessionController {
    id: Uuid,
    curator: Arc<dyn BookCurator>,
    session: Session,
}

impl SessionController {
    pub fn new(curator: Arc<dyn BookCurator>) -> Self {
        Self {
            id: Uuid::new_v4(),
            curator,
            session: Session::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ViewState {
        self.session.view()
    }

    pub fn set_custom_input(&mut self, text: impl Into<String>) {
        self.session.custom_input = text.into();
    }

    /// Starts curation for a catalog mood. Clears any previous results,
    /// error and shown titles.
    pub fn begin_select(&mut self, mood: Mood) -> CurationRequest {
        self.session.shown_titles.clear();
        self.set_view(ViewState::Loading {
            mood: mood.clone(),
            retained: None,
        });

        CurationRequest {
            kind: RequestKind::Initial,
            mood_label: mood.label.clone(),
            description: mood.description.clone(),
            exclude_titles: Vec::new(),
            mood,
        }
    }

    /// Starts curation for the pending custom input. Returns `None` without
    /// touching state when the input is blank.
    pub fn begin_custom(&mut self) -> Option<CurationRequest> {
        let description = non_blank(&self.session.custom_input)?.to_string();
        let mood = Mood::custom(description.clone());

        self.session.shown_titles.clear();
        self.set_view(ViewState::Loading {
            mood: mood.clone(),
            retained: None,
        });

        Some(CurationRequest {
            kind: RequestKind::Initial,
            mood,
            mood_label: CUSTOM_MOOD_REQUEST_LABEL.to_string(),
            description,
            exclude_titles: Vec::new(),
        })
    }

    /// Starts a refresh for the selected mood, excluding every title shown so
    /// far. Returns `None` when no mood is selected.
    pub fn begin_refresh(&mut self) -> Option<CurationRequest> {
        let mood = self.session.selected_mood()?.clone();
        let retained = self.session.recommendations().cloned();

        self.set_view(ViewState::Loading {
            mood: mood.clone(),
            retained,
        });

        Some(CurationRequest {
            kind: RequestKind::Refresh,
            mood_label: mood.label.clone(),
            description: mood.description.clone(),
            exclude_titles: self.session.shown_titles().to_vec(),
            mood,
        })
    }

    /// Applies the outcome of a curator call.
    pub fn complete(
        &mut self,
        req: CurationRequest,
        result: Result<CurationResponse, CurationError>,
    ) -> Vec<SessionEffect> {
        let CurationRequest { kind, mood, .. } = req;

        match (kind, result) {
            (RequestKind::Initial, Ok(recommendations)) => {
                self.session.shown_titles.replace_with(&recommendations);
                self.set_view(ViewState::Results {
                    mood,
                    recommendations,
                    error: None,
                });
                Vec::new()
            }
            (RequestKind::Refresh, Ok(recommendations)) => {
                self.session.shown_titles.append(&recommendations);
                self.set_view(ViewState::Results {
                    mood,
                    recommendations,
                    error: None,
                });
                vec![SessionEffect::ScrollToTop]
            }
            (RequestKind::Initial, Err(e)) => {
                let error = failure_message(&e, SELECTION_FAILURE_FALLBACK);
                log::warn!("curation for {} failed: {error}", mood.id);
                self.set_view(ViewState::Selection { error: Some(error) });
                Vec::new()
            }
            (RequestKind::Refresh, Err(e)) => {
                let error = failure_message(&e, REFRESH_FAILURE_FALLBACK);
                log::warn!("refresh for {} failed: {error}", mood.id);

                let retained = match std::mem::take(&mut self.session.view) {
                    ViewState::Loading { retained, .. } => retained,
                    ViewState::Results {
                        recommendations, ..
                    } => Some(recommendations),
                    ViewState::Selection { .. } => None,
                };
                let next = match retained {
                    Some(recommendations) => ViewState::Results {
                        mood,
                        recommendations,
                        error: Some(error),
                    },
                    None => ViewState::Selection { error: Some(error) },
                };
                self.set_view(next);
                Vec::new()
            }
        }
    }

    /// Awaits the curator for a prepared request and applies the result.
    pub async fn execute(&mut self, req: CurationRequest) -> Vec<SessionEffect> {
        let result = self
            .curator
            .curate(&req.mood_label, &req.description, &req.exclude_titles)
            .await;
        self.complete(req, result)
    }

    pub async fn select_mood(&mut self, mood: Mood) -> Vec<SessionEffect> {
        let req = self.begin_select(mood);
        self.execute(req).await
    }

    /// Replaces the pending custom input with `text` and submits it.
    /// Returns `None` when the text is blank.
    pub async fn submit_custom_mood(&mut self, text: &str) -> Option<Vec<SessionEffect>> {
        self.set_custom_input(text);
        let req = self.begin_custom()?;
        Some(self.execute(req).await)
    }

    /// Returns `None` when no mood is selected.
    pub async fn refresh(&mut self) -> Option<Vec<SessionEffect>> {
        let req = self.begin_refresh()?;
        Some(self.execute(req).await)
    }

    pub fn return_to_selection(&mut self) {
        self.session.shown_titles.clear();
        self.session.custom_input.clear();
        self.set_view(ViewState::default());
    }

    fn set_view(&mut self, next: ViewState) {
        let from: ViewKind = self.session.kind();
        let to = next.kind();
        if from != to {
            log::info!("session {}: view {:?} -> {:?}", self.id, from, to);
        }
        self.session.view = next;
    }
}

fn failure_message(e: &CurationError, fallback: &str) -> String {
    match non_blank(e.user_message()) {
        Some(msg) => msg.to_string(),
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CurateCall, ScriptedCurator, sample_response};
    use moodreader_core::catalog::{find_mood, mood_catalog};

    fn controller(curator: &Arc<ScriptedCurator>) -> SessionController {
        SessionController::new(curator.clone())
    }

    fn joyful() -> Mood {
        find_mood("joyful").unwrap()
    }

    #[tokio::test]
    async fn selecting_any_catalog_mood_reaches_results() {
        for mood in mood_catalog() {
            let curator = Arc::new(ScriptedCurator::new().with_reply(sample_response("T", 6)));
            let mut c = controller(&curator);

            let req = c.begin_select(mood.clone());
            assert_eq!(c.session().kind(), ViewKind::Loading);
            assert_eq!(c.session().selected_mood(), Some(&mood));

            let effects = c.execute(req).await;
            assert!(effects.is_empty());
            assert_eq!(c.session().kind(), ViewKind::Results);
            assert_eq!(c.session().selected_mood(), Some(&mood));
            let expected: Vec<String> = (1..=6).map(|i| format!("T {i}")).collect();
            assert_eq!(c.session().shown_titles(), expected.as_slice());

            assert_eq!(
                curator.calls(),
                vec![CurateCall {
                    mood_label: mood.label.clone(),
                    description: mood.description.clone(),
                    exclude_titles: vec![],
                }]
            );
        }
    }

    #[tokio::test]
    async fn blank_custom_input_is_skipped() {
        let curator = Arc::new(ScriptedCurator::new());
        let mut c = controller(&curator);

        for text in ["", "   ", "\n\t "] {
            assert!(c.submit_custom_mood(text).await.is_none());
            assert_eq!(c.session().kind(), ViewKind::Selection);
            assert!(c.session().error().is_none());
        }
        assert!(curator.calls().is_empty());
    }

    #[tokio::test]
    async fn custom_mood_uses_request_label_and_trimmed_text() {
        let curator = Arc::new(ScriptedCurator::new().with_reply(sample_response("C", 3)));
        let mut c = controller(&curator);

        let effects = c.submit_custom_mood("  rainy sunday, cozy  ").await.unwrap();
        assert!(effects.is_empty());

        let mood = c.session().selected_mood().unwrap();
        assert!(mood.is_custom());
        assert_eq!(mood.label, "Unique");
        assert_eq!(mood.description, "rainy sunday, cozy");
        assert_eq!(c.session().custom_input(), "  rainy sunday, cozy  ");

        let calls = curator.calls();
        assert_eq!(calls[0].mood_label, "custom mood");
        assert_eq!(calls[0].description, "rainy sunday, cozy");
    }

    #[tokio::test]
    async fn custom_refresh_sends_the_mood_label() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_reply(sample_response("C", 2))
                .with_reply(sample_response("D", 2)),
        );
        let mut c = controller(&curator);

        c.submit_custom_mood("stormy").await.unwrap();
        c.refresh().await.unwrap();

        let calls = curator.calls();
        assert_eq!(calls[1].mood_label, "Unique");
        assert_eq!(calls[1].description, "stormy");
    }

    #[tokio::test]
    async fn refresh_without_mood_is_noop() {
        let curator = Arc::new(ScriptedCurator::new());
        let mut c = controller(&curator);

        assert!(c.begin_refresh().is_none());
        assert!(c.refresh().await.is_none());
        assert_eq!(c.session(), &Session::default());
        assert!(curator.calls().is_empty());
    }

    #[tokio::test]
    async fn joyful_refresh_accumulates_titles() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_reply(sample_response("First", 6))
                .with_reply(sample_response("Second", 6)),
        );
        let mut c = controller(&curator);

        c.select_mood(joyful()).await;
        assert_eq!(c.session().kind(), ViewKind::Results);
        assert_eq!(c.session().shown_titles().len(), 6);
        let first_batch = c.session().shown_titles().to_vec();

        let effects = c.refresh().await.unwrap();
        assert_eq!(effects, vec![SessionEffect::ScrollToTop]);
        assert_eq!(c.session().kind(), ViewKind::Results);
        assert_eq!(c.session().shown_titles().len(), 12);
        assert_eq!(
            c.session().recommendations().unwrap().books[0].title,
            "Second 1"
        );

        let calls = curator.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].mood_label, "Joyful");
        assert!(calls[0].exclude_titles.is_empty());
        assert_eq!(calls[1].mood_label, "Joyful");
        assert_eq!(calls[1].description, joyful().description);
        assert_eq!(calls[1].exclude_titles, first_batch);
    }

    #[tokio::test]
    async fn refresh_excludes_full_accumulated_list() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_reply(sample_response("A", 6))
                .with_reply(sample_response("B", 5))
                .with_reply(sample_response("C", 4))
                .with_reply(sample_response("D", 6)),
        );
        let mut c = controller(&curator);

        c.select_mood(joyful()).await;
        for _ in 0..3 {
            let before = c.session().shown_titles().to_vec();
            let req = c.begin_refresh().unwrap();
            assert_eq!(req.kind(), RequestKind::Refresh);
            assert_eq!(req.exclude_titles(), before.as_slice());
            c.execute(req).await;
        }

        assert_eq!(c.session().shown_titles().len(), 6 + 5 + 4 + 6);
        let calls = curator.calls();
        assert_eq!(calls[3].exclude_titles.len(), 6 + 5 + 4);
    }

    #[tokio::test]
    async fn refresh_keeps_duplicate_titles() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_reply(sample_response("Same", 2))
                .with_reply(sample_response("Same", 2)),
        );
        let mut c = controller(&curator);

        c.select_mood(joyful()).await;
        c.refresh().await.unwrap();
        assert_eq!(
            c.session().shown_titles(),
            &["Same 1", "Same 2", "Same 1", "Same 2"]
        );
    }

    #[tokio::test]
    async fn quota_failure_returns_to_selection() {
        let curator = Arc::new(ScriptedCurator::new().with_failure("quota exceeded"));
        let mut c = controller(&curator);

        c.select_mood(joyful()).await;
        assert_eq!(c.session().kind(), ViewKind::Selection);
        assert_eq!(c.session().error(), Some("quota exceeded"));
        assert!(c.session().recommendations().is_none());
        assert!(c.session().selected_mood().is_none());
        assert!(c.session().shown_titles().is_empty());
    }

    #[tokio::test]
    async fn initial_failure_discards_previous_results() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_reply(sample_response("Old", 6))
                .with_failure("boom"),
        );
        let mut c = controller(&curator);

        c.select_mood(joyful()).await;
        c.select_mood(find_mood("pensive").unwrap()).await;

        assert_eq!(c.session().kind(), ViewKind::Selection);
        assert_eq!(c.session().error(), Some("boom"));
        assert!(c.session().recommendations().is_none());
        assert!(c.session().shown_titles().is_empty());
    }

    #[tokio::test]
    async fn empty_failure_message_uses_fallback() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_failure("")
                .with_reply(sample_response("A", 1))
                .with_failure("  "),
        );
        let mut c = controller(&curator);

        c.select_mood(joyful()).await;
        assert_eq!(c.session().error(), Some(SELECTION_FAILURE_FALLBACK));

        c.select_mood(joyful()).await;
        c.refresh().await.unwrap();
        assert_eq!(c.session().error(), Some(REFRESH_FAILURE_FALLBACK));
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_results() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_reply(sample_response("Kept", 6))
                .with_failure("network down"),
        );
        let mut c = controller(&curator);

        c.select_mood(joyful()).await;
        let before = c.session().recommendations().cloned();

        let req = c.begin_refresh().unwrap();
        assert_eq!(c.session().kind(), ViewKind::Loading);
        assert_eq!(c.session().recommendations(), before.as_ref());

        let effects = c.execute(req).await;
        assert!(effects.is_empty());
        assert_eq!(c.session().kind(), ViewKind::Results);
        assert_eq!(c.session().error(), Some("network down"));
        assert_eq!(c.session().recommendations(), before.as_ref());
        assert_eq!(c.session().selected_mood(), Some(&joyful()));
        assert_eq!(c.session().shown_titles().len(), 6);
    }

    #[tokio::test]
    async fn successful_refresh_clears_previous_error() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_reply(sample_response("A", 2))
                .with_failure("flaky")
                .with_reply(sample_response("B", 2)),
        );
        let mut c = controller(&curator);

        c.select_mood(joyful()).await;
        c.refresh().await.unwrap();
        assert_eq!(c.session().error(), Some("flaky"));

        c.refresh().await.unwrap();
        assert!(c.session().error().is_none());
        assert_eq!(c.session().shown_titles().len(), 4);
    }

    #[test]
    fn refresh_failure_without_retained_results_falls_back_to_selection() {
        let curator = Arc::new(ScriptedCurator::new());
        let mut c = controller(&curator);

        let select = c.begin_select(joyful());
        let refresh = CurationRequest {
            kind: RequestKind::Refresh,
            ..select
        };
        c.complete(refresh, Err(CurationError::recommendation_failure("x")));

        assert_eq!(c.session().kind(), ViewKind::Selection);
        assert_eq!(c.session().error(), Some("x"));
    }

    #[tokio::test]
    async fn return_to_selection_resets_everything() {
        let curator = Arc::new(
            ScriptedCurator::new()
                .with_reply(sample_response("A", 3))
                .with_failure("later"),
        );
        let mut c = controller(&curator);

        c.submit_custom_mood("wistful").await.unwrap();
        c.refresh().await.unwrap();
        assert!(c.session().error().is_some());

        c.return_to_selection();
        assert_eq!(c.session(), &Session::default());
        assert_eq!(c.session().custom_input(), "");
    }

    #[test]
    fn return_to_selection_from_loading() {
        let curator = Arc::new(ScriptedCurator::new());
        let mut c = controller(&curator);

        c.set_custom_input("half typed");
        let _ = c.begin_select(joyful());
        c.return_to_selection();
        assert_eq!(c.session(), &Session::default());
    }
}
