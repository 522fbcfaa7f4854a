// netlytics-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("Schema collision in '{source_name}': '{first}' and '{second}' both map to '{canonical}'")]
    #[diagnostic(
        code(netlytics::domain::schema_collision),
        help("Two raw headers canonicalize to the same column. The export format probably changed.")
    )]
    SchemaCollision {
        source_name: String,
        canonical: String,
        first: String,
        second: String,
    },

    #[error("Missing columns in '{source_name}': {}", .columns.join(", "))]
    #[diagnostic(
        code(netlytics::domain::missing_columns),
        help("Expected columns are absent. Check whether LinkedIn changed its export format.")
    )]
    MissingColumns {
        source_name: String,
        columns: Vec<String>,
    },

    #[error("Row {row} has {found} values, schema has {expected} columns")]
    #[diagnostic(code(netlytics::domain::row_width))]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid keyword pattern '{name}': {reason}")]
    #[diagnostic(code(netlytics::domain::keyword_pattern))]
    InvalidPattern { name: String, reason: String },
}

impl DomainError {
    /// Errors caused by the shape of the input rather than its contents.
    pub fn is_schema_drift(&self) -> bool {
        matches!(
            self,
            Self::SchemaCollision { .. } | Self::MissingColumns { .. }
        )
    }
}
