// netlytics-core/src/infrastructure/csv/writer.rs

use std::path::Path;

use tracing::info;

use crate::domain::table::{Table, Value};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, remove_if_exists};
use crate::ports::TableWriter;

/// UTF-8 CSV with a canonical header row. Replaces the target atomically.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableWriter;

impl CsvTableWriter {
    pub fn to_bytes(table: &Table) -> Result<Vec<u8>, InfrastructureError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(table.schema().names())?;
        for row in table.rows() {
            wtr.write_record(row.iter().map(Value::to_field))?;
        }
        wtr.into_inner()
            .map_err(|e| InfrastructureError::Io(e.into_error()))
    }
}

impl TableWriter for CsvTableWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<(), InfrastructureError> {
        let bytes = Self::to_bytes(table)?;
        atomic_write(path, bytes)?;
        info!(path = %path.display(), rows = table.len(), "Saved cleaned data");
        Ok(())
    }

    fn discard(&self, path: &Path) -> Result<(), InfrastructureError> {
        if remove_if_exists(path)? {
            info!(path = %path.display(), "Removed stale cleaned data");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{ColumnDef, ColumnType, Schema};
    use anyhow::Result;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_typed_values_rendered() -> Result<()> {
        let schema = Schema::new(vec![
            ColumnDef {
                name: "date".into(),
                kind: ColumnType::Timestamp,
            },
            ColumnDef {
                name: "content_hash".into(),
                kind: ColumnType::Digest,
            },
            ColumnDef {
                name: "has_referral_keyword".into(),
                kind: ColumnType::Boolean,
            },
            ColumnDef {
                name: "note".into(),
                kind: ColumnType::Text,
            },
        ])?;
        let table = Table::new(
            schema,
            vec![vec![
                Value::from(Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).single()),
                Value::Null,
                Value::Bool(true),
                Value::Text("a, \"b\"".into()),
            ]],
        )?;

        let text = String::from_utf8(CsvTableWriter::to_bytes(&table)?)?;
        assert_eq!(
            text,
            "date,content_hash,has_referral_keyword,note\n2023-01-05T00:00:00Z,,true,\"a, \"\"b\"\"\"\n"
        );
        Ok(())
    }
}
