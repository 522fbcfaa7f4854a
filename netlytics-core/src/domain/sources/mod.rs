// netlytics-core/src/domain/sources/mod.rs
//
// The six LinkedIn export sources. Each cleaner is a configuration binding over
// the standardizer: required columns, column hints, optional post-processing.

pub mod comments;
pub mod connections;
pub mod guide_messages;
pub mod invitations;
pub mod learning_messages;
pub mod messages;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::governance::QualityReport;
use crate::domain::normalize::{has_token, mentions_hint};
use crate::domain::standardize::{StandardizeSpec, anonymize_column, canonical_columns, standardize};
use crate::domain::table::{RawTable, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Invitations,
    Connections,
    Messages,
    GuideMessages,
    LearningMessages,
    Comments,
}

impl SourceKind {
    /// Processing order.
    pub const ALL: [SourceKind; 6] = [
        Self::Invitations,
        Self::Connections,
        Self::Messages,
        Self::GuideMessages,
        Self::LearningMessages,
        Self::Comments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invitations => "invitations",
            Self::Connections => "connections",
            Self::Messages => "messages",
            Self::GuideMessages => "guide_messages",
            Self::LearningMessages => "learning_messages",
            Self::Comments => "comments",
        }
    }

    /// File name inside a LinkedIn data export.
    pub fn default_input_file(&self) -> &'static str {
        match self {
            Self::Invitations => "Invitations.csv",
            Self::Connections => "Connections.csv",
            Self::Messages => "messages.csv",
            Self::GuideMessages => "guide_messages.csv",
            Self::LearningMessages => "learning_coach_messages.csv",
            Self::Comments => "Comments.csv",
        }
    }

    pub fn output_file(&self) -> String {
        format!("{}_cleaned.csv", self.as_str())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Invitations => "Top of funnel - connection requests",
            Self::Connections => "Network growth - accepted connections",
            Self::Messages => "Mid funnel - direct messaging conversations",
            Self::GuideMessages => "Platform engagement - guided messages",
            Self::LearningMessages => "Learning engagement - coach interactions",
            Self::Comments => "Engagement layer - public comments",
        }
    }

    pub fn cleaner(&self) -> &'static dyn SourceCleaner {
        match self {
            Self::Invitations => &invitations::InvitationsCleaner,
            Self::Connections => &connections::ConnectionsCleaner,
            Self::Messages => &messages::MessagesCleaner,
            Self::GuideMessages => &guide_messages::GuideMessagesCleaner,
            Self::LearningMessages => &learning_messages::LearningMessagesCleaner,
            Self::Comments => &comments::CommentsCleaner,
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("Unknown source: '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Column binding of one source. All names are canonical.
#[derive(Debug)]
pub struct SourceProfile {
    /// Absent columns are schema drift.
    pub required: &'static [&'static str],
    /// Columns with any of these tokens are parsed as datetimes.
    pub datetime_hints: &'static [&'static str],
    /// Columns with any of these tokens are replaced by digests.
    pub anonymize_hints: &'static [&'static str],
    /// PII columns needed by post-processing; hashed right after it.
    pub deferred_anonymize: &'static [&'static str],
    pub dedup_key: Option<&'static [&'static str]>,
}

pub trait SourceCleaner: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn profile(&self) -> &'static SourceProfile;

    /// Derived columns. Runs before deferred anonymization.
    fn post_process(&self, table: Table) -> Result<Table, DomainError> {
        Ok(table)
    }
}

#[derive(Debug, Clone)]
pub struct CleanedSource {
    pub table: Table,
    pub report: QualityReport,
}

/// Datetime and PII columns detected for `columns` under `profile`.
/// A column matching both kinds of hints is treated as PII.
pub fn detect_columns(profile: &SourceProfile, columns: &[String]) -> (Vec<String>, Vec<String>) {
    let anonymize: Vec<String> = columns
        .iter()
        .filter(|c| mentions_hint(c, profile.anonymize_hints))
        .filter(|c| !profile.deferred_anonymize.contains(&c.as_str()))
        .cloned()
        .collect();
    let datetime: Vec<String> = columns
        .iter()
        .filter(|c| has_token(c, profile.datetime_hints))
        .filter(|c| !anonymize.contains(c) && !profile.deferred_anonymize.contains(&c.as_str()))
        .cloned()
        .collect();
    (datetime, anonymize)
}

pub fn clean_source(
    cleaner: &dyn SourceCleaner,
    raw: &RawTable,
    digest_length: usize,
) -> Result<CleanedSource, DomainError> {
    let kind = cleaner.kind();
    let source = kind.as_str();
    let profile = cleaner.profile();

    let columns = canonical_columns(source, raw.headers())?;
    let missing: Vec<String> = profile
        .required
        .iter()
        .filter(|r| !columns.iter().any(|c| c == *r))
        .map(|r| r.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::MissingColumns {
            source_name: source.to_string(),
            columns: missing,
        });
    }

    let (datetime, anonymize) = detect_columns(profile, &columns);
    info!(source, datetime = ?datetime, anonymize = ?anonymize, "Detected columns");

    let mut spec = StandardizeSpec::new(source, digest_length)
        .datetime_columns(datetime)
        .anonymize_columns(anonymize);
    if let Some(key) = profile.dedup_key {
        spec = spec.dedup_key(key.iter().copied());
    }

    let (table, report) = standardize(raw, &spec)?;
    let mut table = cleaner.post_process(table)?;

    for col in profile.deferred_anonymize {
        if table.schema().contains(col) {
            anonymize_column(&mut table, col, digest_length).map_err(|e| match e {
                DomainError::MissingColumns { columns, .. } => DomainError::MissingColumns {
                    source_name: source.to_string(),
                    columns,
                },
                other => other,
            })?;
        }
    }

    let report = report.with_table_metrics(&table);
    Ok(CleanedSource { table, report })
}
