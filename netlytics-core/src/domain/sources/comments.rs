// netlytics-core/src/domain/sources/comments.rs
//
// Comments.csv: public comments on posts. Export header: Date,Link,Message

use super::{SourceCleaner, SourceKind, SourceProfile};

static PROFILE: SourceProfile = SourceProfile {
    required: &["date", "message"],
    datetime_hints: &["date", "time", "created", "posted"],
    anonymize_hints: &[
        "url", "link", "author", "commenter", "name", "comment", "text", "message",
    ],
    deferred_anonymize: &[],
    dedup_key: None,
};

pub struct CommentsCleaner;

impl SourceCleaner for CommentsCleaner {
    fn kind(&self) -> SourceKind {
        SourceKind::Comments
    }

    fn profile(&self) -> &'static SourceProfile {
        &PROFILE
    }
}
