// netlytics-core/src/domain/sources/guide_messages.rs
//
// guide_messages.csv: LinkedIn guided message interactions. Same layout as
// messages.csv, but the content is hashed directly; no signals are derived.

use super::{SourceCleaner, SourceKind, SourceProfile};

static PROFILE: SourceProfile = SourceProfile {
    required: &["conversation_id", "date", "content"],
    datetime_hints: &["date", "sent", "time", "created"],
    anonymize_hints: &[
        "name", "sender", "from", "to", "title", "subject", "url", "urls", "link", "content",
        "message",
    ],
    deferred_anonymize: &[],
    dedup_key: None,
};

pub struct GuideMessagesCleaner;

impl SourceCleaner for GuideMessagesCleaner {
    fn kind(&self) -> SourceKind {
        SourceKind::GuideMessages
    }

    fn profile(&self) -> &'static SourceProfile {
        &PROFILE
    }
}
