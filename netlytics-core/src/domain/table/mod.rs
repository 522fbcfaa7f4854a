// netlytics-core/src/domain/table/mod.rs
//
// Schema-aware containers for raw and cleaned records. Column names are checked
// once, at construction, instead of at every access.

pub mod schema;
pub mod value;

pub use schema::{ColumnDef, ColumnType, Schema};
pub use value::Value;

use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};

/// A CSV file as read from disk: header row plus string cells.
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    malformed_rows: usize,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DomainError> {
        check_widths(headers.len(), rows.iter().map(Vec::len))?;
        Ok(Self {
            headers,
            rows,
            malformed_rows: 0,
        })
    }

    /// Records how many input rows the reader had to discard.
    pub fn with_malformed_rows(mut self, count: usize) -> Self {
        self.malformed_rows = count;
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn malformed_rows(&self) -> usize {
        self.malformed_rows
    }
}

/// A cleaned table: canonical column names, typed cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Vec<Value>>,
    processed_at: DateTime<Utc>,
}

impl Table {
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Result<Self, DomainError> {
        check_widths(schema.len(), rows.iter().map(Vec::len))?;
        Ok(Self {
            schema,
            rows,
            processed_at: Utc::now(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn processed_at(&self) -> DateTime<Utc> {
        self.processed_at
    }

    pub fn column_names(&self) -> Vec<String> {
        self.schema.names().map(str::to_string).collect()
    }

    /// Values of one column in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.schema.index_of(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Appends a column. `values` must have one entry per row.
    pub fn push_column(&mut self, def: ColumnDef, values: Vec<Value>) -> Result<(), DomainError> {
        if values.len() != self.rows.len() {
            return Err(DomainError::RowWidthMismatch {
                row: values.len().min(self.rows.len()),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.schema.push(def)?;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Rewrites every cell of column `idx` in place and retypes it.
    pub(crate) fn map_column<F>(&mut self, idx: usize, kind: ColumnType, mut f: F)
    where
        F: FnMut(&Value) -> Value,
    {
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        self.schema.set_kind(idx, kind);
    }

    pub(crate) fn rename_column(&mut self, idx: usize, name: String) -> Result<(), DomainError> {
        self.schema.rename(idx, name)
    }

    pub fn drop_column(&mut self, name: &str) -> Option<ColumnDef> {
        let idx = self.schema.index_of(name)?;
        for row in &mut self.rows {
            row.remove(idx);
        }
        self.schema.remove(idx)
    }

    /// Keeps rows for which `keep` returns true, preserving order.
    pub(crate) fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Value]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

fn check_widths(
    expected: usize,
    widths: impl Iterator<Item = usize>,
) -> Result<(), DomainError> {
    for (row, found) in widths.enumerate() {
        if found != expected {
            return Err(DomainError::RowWidthMismatch {
                row,
                expected,
                found,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn text(name: &str) -> ColumnDef {
        ColumnDef {
            name: name.to_string(),
            kind: ColumnType::Text,
        }
    }

    #[test]
    fn test_raw_table_rejects_ragged_rows() {
        let res = RawTable::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        );
        assert!(matches!(
            res,
            Err(DomainError::RowWidthMismatch {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_push_and_drop_column() -> Result<()> {
        let schema = Schema::new(vec![text("a")])?;
        let mut table = Table::new(
            schema,
            vec![vec![Value::Text("x".into())], vec![Value::Null]],
        )?;

        table.push_column(
            ColumnDef {
                name: "flag".into(),
                kind: ColumnType::Boolean,
            },
            vec![Value::Bool(true), Value::Bool(false)],
        )?;
        assert_eq!(table.value(1, "flag"), Some(&Value::Bool(false)));

        let dropped = table.drop_column("a");
        assert_eq!(dropped.map(|c| c.name), Some("a".to_string()));
        assert_eq!(table.column_names(), vec!["flag"]);
        assert_eq!(table.rows()[0], vec![Value::Bool(true)]);
        Ok(())
    }

    #[test]
    fn test_push_column_length_mismatch() -> Result<()> {
        let schema = Schema::new(vec![text("a")])?;
        let mut table = Table::new(schema, vec![vec![Value::Null]])?;
        let res = table.push_column(text("b"), vec![]);
        assert!(res.is_err());
        assert_eq!(table.schema().len(), 1);
        Ok(())
    }
}
