// netlytics-core/src/domain/sources/learning_messages.rs
//
// learning_coach_messages.csv: LinkedIn Learning coach conversations.

use super::{SourceCleaner, SourceKind, SourceProfile};

static PROFILE: SourceProfile = SourceProfile {
    required: &["date", "content"],
    datetime_hints: &["date", "sent", "time", "created"],
    anonymize_hints: &[
        "name", "from", "to", "title", "subject", "url", "urls", "link", "content", "message",
    ],
    deferred_anonymize: &[],
    dedup_key: None,
};

pub struct LearningMessagesCleaner;

impl SourceCleaner for LearningMessagesCleaner {
    fn kind(&self) -> SourceKind {
        SourceKind::LearningMessages
    }

    fn profile(&self) -> &'static SourceProfile {
        &PROFILE
    }
}
