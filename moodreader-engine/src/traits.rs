use crate::error::CurationError;
use async_trait::async_trait;
use moodreader_core::types::CurationResponse;

#[async_trait]
pub trait BookCurator: Send + Sync {
    /// Requests a themed book list for a mood, asking the model to avoid
    /// `exclude_titles`. Avoidance is requested, not guaranteed.
    async fn curate(
        &self,
        mood_label: &str,
        description: &str,
        exclude_titles: &[String],
    ) -> Result<CurationResponse, CurationError>;
}
