use thiserror::Error;

pub const RECOMMENDATION_FAILURE_MESSAGE: &str =
    "Failed to fetch recommendations. Please try again later.";

/// Every curation failure reaches callers as this one kind. Root causes
/// (auth, quota, transport, unparseable output) go to the log only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurationError {
    #[error("{0}")]
    RecommendationFailure(String),
}

impl CurationError {
    pub fn recommendation_failure(message: impl Into<String>) -> Self {
        CurationError::RecommendationFailure(message.into())
    }

    pub fn user_message(&self) -> &str {
        match self {
            CurationError::RecommendationFailure(msg) => msg,
        }
    }
}
