// netlytics-core/src/domain/sources/connections.rs
//
// Connections.csv: accepted connections (network growth).
// Export header: First Name,Last Name,URL,Email Address,Company,Position,Connected On

use super::{SourceCleaner, SourceKind, SourceProfile};

static PROFILE: SourceProfile = SourceProfile {
    required: &["first_name", "last_name", "connected_on"],
    datetime_hints: &["date", "connected", "time", "joined"],
    anonymize_hints: &["name", "email", "address", "url", "link"],
    deferred_anonymize: &[],
    dedup_key: None,
};

pub struct ConnectionsCleaner;

impl SourceCleaner for ConnectionsCleaner {
    fn kind(&self) -> SourceKind {
        SourceKind::Connections
    }

    fn profile(&self) -> &'static SourceProfile {
        &PROFILE
    }
}
