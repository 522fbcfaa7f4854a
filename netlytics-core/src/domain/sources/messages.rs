// netlytics-core/src/domain/sources/messages.rs
//
// messages.csv: direct conversations (mid funnel). The only source with derived
// analytical columns: outcome keyword flags and conversation depth.
// Export header: CONVERSATION ID,CONVERSATION TITLE,FROM,SENDER PROFILE URL,TO,
// RECIPIENT PROFILE URLS,DATE,SUBJECT,CONTENT,FOLDER

use std::collections::HashMap;

use tracing::info;

use super::{SourceCleaner, SourceKind, SourceProfile};
use crate::domain::error::DomainError;
use crate::domain::governance::{KeywordScanner, OUTCOME_SIGNALS};
use crate::domain::table::{ColumnDef, ColumnType, Table, Value};

pub const CONVERSATION_COLUMN: &str = "conversation_id";
pub const CONTENT_COLUMN: &str = "content";
pub const DEPTH_COLUMN: &str = "conversation_depth";

static PROFILE: SourceProfile = SourceProfile {
    required: &[CONVERSATION_COLUMN, "from", "date", CONTENT_COLUMN],
    datetime_hints: &["date", "sent", "time", "created"],
    anonymize_hints: &[
        "name", "sender", "from", "to", "title", "subject", "url", "urls", "link",
    ],
    // Keyword extraction reads the plaintext first.
    deferred_anonymize: &[CONTENT_COLUMN],
    dedup_key: None,
};

pub struct MessagesCleaner;

impl SourceCleaner for MessagesCleaner {
    fn kind(&self) -> SourceKind {
        SourceKind::Messages
    }

    fn profile(&self) -> &'static SourceProfile {
        &PROFILE
    }

    fn post_process(&self, mut table: Table) -> Result<Table, DomainError> {
        add_outcome_flags(&mut table)?;
        add_conversation_depth(&mut table)?;
        Ok(table)
    }
}

/// `has_<signal>_keyword` boolean columns from the message content.
pub fn add_outcome_flags(table: &mut Table) -> Result<(), DomainError> {
    let scanner = KeywordScanner::new(&OUTCOME_SIGNALS)?;
    let names: Vec<&str> = scanner.names().collect();

    let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(table.len()); names.len()];
    if let Some(content) = table.column(CONTENT_COLUMN) {
        for value in content {
            let flags = scanner.classify_all(value.as_text().unwrap_or_default());
            for (col, flag) in columns.iter_mut().zip(flags) {
                col.push(Value::Bool(flag));
            }
        }
    } else {
        for col in &mut columns {
            col.resize(table.len(), Value::Bool(false));
        }
    }

    for (name, values) in names.iter().zip(columns) {
        let hits = values.iter().filter(|v| **v == Value::Bool(true)).count();
        info!(signal = name, hits, "Extracted outcome keyword");
        table.push_column(
            ColumnDef {
                name: format!("has_{}_keyword", name),
                kind: ColumnType::Boolean,
            },
            values,
        )?;
    }
    Ok(())
}

/// Number of rows sharing each row's conversation id. Missing ids stay missing.
pub fn add_conversation_depth(table: &mut Table) -> Result<(), DomainError> {
    let ids: Vec<Value> = match table.column(CONVERSATION_COLUMN) {
        Some(col) => col.cloned().collect(),
        None => vec![Value::Null; table.len()],
    };

    let mut counts: HashMap<&Value, i64> = HashMap::new();
    for id in ids.iter().filter(|v| !v.is_null()) {
        *counts.entry(id).or_insert(0) += 1;
    }

    let depth = ids
        .iter()
        .map(|id| counts.get(id).map_or(Value::Null, |n| Value::Int(*n)))
        .collect();

    table.push_column(
        ColumnDef {
            name: DEPTH_COLUMN.to_string(),
            kind: ColumnType::Integer,
        },
        depth,
    )
}
