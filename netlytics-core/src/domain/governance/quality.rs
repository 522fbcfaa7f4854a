// netlytics-core/src/domain/governance/quality.rs

use crate::domain::table::Table;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-table quality metrics, produced once per cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub source_table: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub empty_rows_removed: usize,
    pub duplicates_removed: usize,
    pub malformed_rows_skipped: usize,
    pub datetime_parse_failures: usize,
    /// Failures per datetime column (only columns with failures are listed).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub datetime_failures_by_column: BTreeMap<String, usize>,
    pub columns: usize,
    /// Fraction of missing cells per output column, in `[0, 1]`.
    pub null_rates: BTreeMap<String, f64>,
    pub processed_at: DateTime<Utc>,
}

impl QualityReport {
    /// Recomputes the table-derived metrics after post-processing.
    pub fn with_table_metrics(mut self, table: &Table) -> Self {
        self.rows_out = table.len();
        self.columns = table.schema().len();
        self.null_rates = null_rates(table);
        self.processed_at = table.processed_at();
        self
    }
}

pub fn null_rates(table: &Table) -> BTreeMap<String, f64> {
    let total = table.len();
    table
        .schema()
        .names()
        .enumerate()
        .map(|(idx, name)| {
            let nulls = table.rows().iter().filter(|r| r[idx].is_null()).count();
            let rate = if total == 0 {
                0.0
            } else {
                nulls as f64 / total as f64
            };
            (name.to_string(), rate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{ColumnDef, ColumnType, Schema, Value};
    use anyhow::Result;

    #[test]
    fn test_null_rates() -> Result<()> {
        let schema = Schema::new(vec![
            ColumnDef {
                name: "a".into(),
                kind: ColumnType::Text,
            },
            ColumnDef {
                name: "b".into(),
                kind: ColumnType::Text,
            },
        ])?;
        let table = Table::new(
            schema,
            vec![
                vec![Value::Text("x".into()), Value::Null],
                vec![Value::Null, Value::Null],
                vec![Value::Text("y".into()), Value::Null],
                vec![Value::Text("z".into()), Value::Text("w".into())],
            ],
        )?;

        let rates = null_rates(&table);
        assert_eq!(rates.get("a"), Some(&0.25));
        assert_eq!(rates.get("b"), Some(&0.75));
        Ok(())
    }

    #[test]
    fn test_empty_table_has_zero_rates() -> Result<()> {
        let schema = Schema::new(vec![ColumnDef {
            name: "a".into(),
            kind: ColumnType::Text,
        }])?;
        let table = Table::new(schema, vec![])?;
        assert_eq!(null_rates(&table).get("a"), Some(&0.0));
        Ok(())
    }
}
