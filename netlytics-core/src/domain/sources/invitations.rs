// netlytics-core/src/domain/sources/invitations.rs
//
// Invitations.csv: connection requests sent and received (top of funnel).
// Export header: From,To,Sent At,Message,Direction,inviterProfileUrl,inviteeProfileUrl

use super::{SourceCleaner, SourceKind, SourceProfile};

static PROFILE: SourceProfile = SourceProfile {
    required: &["from", "to", "sent_at", "direction"],
    datetime_hints: &["date", "sent", "time", "connected", "accepted"],
    anonymize_hints: &["from", "to", "message", "name", "email", "url", "link"],
    deferred_anonymize: &[],
    dedup_key: None,
};

pub struct InvitationsCleaner;

impl SourceCleaner for InvitationsCleaner {
    fn kind(&self) -> SourceKind {
        SourceKind::Invitations
    }

    fn profile(&self) -> &'static SourceProfile {
        &PROFILE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sources::clean_source;
    use crate::domain::table::{RawTable, Value};
    use anyhow::Result;

    #[test]
    fn test_invitations_export() -> Result<()> {
        let raw = RawTable::new(
            [
                "From",
                "To",
                "Sent At",
                "Message",
                "Direction",
                "inviterProfileUrl",
                "inviteeProfileUrl",
            ]
            .map(String::from)
            .to_vec(),
            vec![
                [
                    "Ada Lovelace",
                    "Alan Turing",
                    "1/12/24, 3:45 PM",
                    "Hi Alan, would love to connect",
                    "OUTGOING",
                    "https://www.linkedin.com/in/ada",
                    "https://www.linkedin.com/in/alan",
                ]
                .map(String::from)
                .to_vec(),
            ],
        )?;

        let cleaned = clean_source(&InvitationsCleaner, &raw, 8)?;
        assert_eq!(
            cleaned.table.column_names(),
            vec![
                "from_hash",
                "to_hash",
                "sent_at",
                "message_hash",
                "direction",
                "inviter_profile_url_hash",
                "invitee_profile_url_hash",
                "source_table",
            ]
        );
        assert_eq!(
            cleaned.table.value(0, "sent_at").map(Value::to_field),
            Some("2024-01-12T15:45:00Z".to_string())
        );
        assert_eq!(
            cleaned.table.value(0, "direction"),
            Some(&Value::Text("OUTGOING".into()))
        );
        Ok(())
    }
}
