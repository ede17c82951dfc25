//! In-memory curator for tests and offline runs.

use crate::error::CurationError;
use crate::traits::BookCurator;
use moodreader_core::types::{Book, CurationResponse, GroundingLink};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurateCall {
    pub mood_label: String,
    pub description: String,
    pub exclude_titles: Vec<String>,
}

/// Replays queued replies in order and records every call it receives.
/// Once the queue is drained, calls fail.
#[derive(Debug, Default)]
pub struct ScriptedCurator {
    replies: Mutex<VecDeque<Result<CurationResponse, CurationError>>>,
    calls: Mutex<Vec<CurateCall>>,
}

impl ScriptedCurator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, resp: CurationResponse) -> Self {
        self.push(Ok(resp));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Err(CurationError::recommendation_failure(message)));
        self
    }

    pub fn push(&self, reply: Result<CurationResponse, CurationError>) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<CurateCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl BookCurator for ScriptedCurator {
    async fn curate(
        &self,
        mood_label: &str,
        description: &str,
        exclude_titles: &[String],
    ) -> Result<CurationResponse, CurationError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CurateCall {
                mood_label: mood_label.to_string(),
                description: description.to_string(),
                exclude_titles: exclude_titles.to_vec(),
            });

        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(CurationError::recommendation_failure(
                    "no scripted reply left",
                ))
            })
    }
}

/// A response with `count` books titled `"<prefix> 1"`, `"<prefix> 2"`, ...
pub fn sample_response(prefix: &str, count: usize) -> CurationResponse {
    CurationResponse {
        curator_note: format!("{prefix} collection"),
        books: (1..=count)
            .map(|i| Book {
                title: format!("{prefix} {i}"),
                author: format!("Author {i}"),
                year: "2021".into(),
                rating: "4.3".into(),
                summary: "A story.".into(),
                reason: "It fits.".into(),
                isbn: format!("97800000000{i:02}"),
            })
            .collect(),
        links: vec![GroundingLink {
            title: format!("{prefix} source"),
            uri: "https://example.com/source".into(),
        }],
    }
}
