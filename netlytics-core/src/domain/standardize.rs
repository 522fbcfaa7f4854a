// netlytics-core/src/domain/standardize.rs
//
// Raw table -> cleaned table + quality report. Pure: no file I/O here, callers
// handle persistence.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::governance::masking::{anonymize, digest_column_name};
use crate::domain::governance::quality::{QualityReport, null_rates};
use crate::domain::normalize::{canonicalize_header, parse_datetime_column};
use crate::domain::table::{ColumnDef, ColumnType, RawTable, Schema, Table, Value};

/// Name of the provenance column appended to every cleaned table.
pub const SOURCE_TABLE_COLUMN: &str = "source_table";

/// What to do with one raw table. Column names are canonical (post-rename).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizeSpec {
    pub source_name: String,
    pub datetime_columns: Vec<String>,
    pub anonymize_columns: Vec<String>,
    /// `None` deduplicates on the full row.
    pub dedup_key_columns: Option<Vec<String>>,
    pub digest_length: usize,
}

impl StandardizeSpec {
    pub fn new(source_name: impl Into<String>, digest_length: usize) -> Self {
        Self {
            source_name: source_name.into(),
            datetime_columns: Vec::new(),
            anonymize_columns: Vec::new(),
            dedup_key_columns: None,
            digest_length,
        }
    }

    pub fn datetime_columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datetime_columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn anonymize_columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.anonymize_columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn dedup_key<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dedup_key_columns = Some(cols.into_iter().map(Into::into).collect());
        self
    }
}

/// Canonical column names for `headers`, failing on collisions.
/// Headers with no usable characters become `column_<position>`.
pub fn canonical_columns(source_name: &str, headers: &[String]) -> Result<Vec<String>, DomainError> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(headers.len());
    let mut names = Vec::with_capacity(headers.len());

    for (i, raw) in headers.iter().enumerate() {
        let mut canonical = canonicalize_header(raw);
        if canonical.is_empty() {
            canonical = format!("column_{}", i + 1);
        }
        if let Some(first) = seen.get(&canonical) {
            return Err(DomainError::SchemaCollision {
                source_name: source_name.to_string(),
                canonical,
                first: first.to_string(),
                second: raw.clone(),
            });
        }
        seen.insert(canonical.clone(), raw);
        names.push(canonical);
    }

    Ok(names)
}

pub fn standardize(
    raw: &RawTable,
    spec: &StandardizeSpec,
) -> Result<(Table, QualityReport), DomainError> {
    let source = spec.source_name.as_str();
    info!(source, rows = raw.len(), columns = raw.headers().len(), "Standardizing");

    // 1. Canonical names
    let names = canonical_columns(source, raw.headers())?;
    let schema = Schema::new(
        names
            .iter()
            .map(|name| ColumnDef {
                name: name.clone(),
                kind: ColumnType::Text,
            })
            .collect(),
    )?;
    debug!(source, columns = ?names, "Canonical columns");

    let missing: Vec<String> = spec
        .datetime_columns
        .iter()
        .chain(&spec.anonymize_columns)
        .chain(spec.dedup_key_columns.iter().flatten())
        .filter(|c| !schema.contains(c))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::MissingColumns {
            source_name: source.to_string(),
            columns: dedup_names(missing),
        });
    }

    // Resolved before renames so that keys on anonymized columns still work.
    let key_indices: Option<Vec<usize>> = spec.dedup_key_columns.as_ref().map(|cols| {
        cols.iter()
            .filter_map(|c| schema.index_of(c))
            .collect()
    });

    let rows = raw
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| Value::from_raw(cell)).collect())
        .collect();
    let mut table = Table::new(schema, rows)?;

    // 2. Datetimes
    let mut datetime_failures = BTreeMap::new();
    for col in dedup_names(spec.datetime_columns.clone()) {
        let Some(idx) = table.schema().index_of(&col) else {
            continue;
        };
        let parsed = parse_datetime_column(&col, table.rows().iter().map(|r| r[idx].as_text()));
        if parsed.failures > 0 {
            datetime_failures.insert(col.clone(), parsed.failures);
        }
        let mut values = parsed.values.into_iter();
        table.map_column(idx, ColumnType::Timestamp, |_| {
            Value::from(values.next().flatten())
        });
    }

    // 3. Anonymization: the plaintext column is replaced in place and renamed.
    for col in dedup_names(spec.anonymize_columns.clone()) {
        anonymize_column(&mut table, &col, spec.digest_length)?;
    }

    // 4. Fully empty rows
    let before = table.len();
    table.retain_rows(|row| !row.iter().all(Value::is_null));
    let empty_rows_removed = before - table.len();

    // 5. Deduplication, first occurrence wins
    let before = table.len();
    let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(before);
    table.retain_rows(|row| {
        let key = match &key_indices {
            Some(indices) => indices.iter().map(|&i| row[i].clone()).collect(),
            None => row.to_vec(),
        };
        seen.insert(key)
    });
    let duplicates_removed = before - table.len();

    // 6. Provenance
    let provenance = vec![Value::Text(source.to_string()); table.len()];
    table
        .push_column(
            ColumnDef {
                name: SOURCE_TABLE_COLUMN.to_string(),
                kind: ColumnType::Text,
            },
            provenance,
        )
        .map_err(|e| with_source(e, source))?;

    // 7. Report
    let report = QualityReport {
        source_table: source.to_string(),
        rows_in: raw.len(),
        rows_out: table.len(),
        empty_rows_removed,
        duplicates_removed,
        malformed_rows_skipped: raw.malformed_rows(),
        datetime_parse_failures: datetime_failures.values().sum(),
        datetime_failures_by_column: datetime_failures,
        columns: table.schema().len(),
        null_rates: null_rates(&table),
        processed_at: table.processed_at(),
    };

    info!(
        source,
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        empty_rows_removed,
        duplicates_removed,
        datetime_failures = report.datetime_parse_failures,
        "Standardization complete"
    );

    Ok((table, report))
}

/// Replaces `column` by `<column>_hash`. The plaintext column does not survive.
pub fn anonymize_column(
    table: &mut Table,
    column: &str,
    digest_length: usize,
) -> Result<(), DomainError> {
    let Some(idx) = table.schema().index_of(column) else {
        return Err(DomainError::MissingColumns {
            source_name: String::new(),
            columns: vec![column.to_string()],
        });
    };

    table.map_column(idx, ColumnType::Digest, |value| {
        if value.is_null() {
            return Value::Null;
        }
        let digest = anonymize(&value.to_field(), digest_length);
        if digest.is_empty() {
            Value::Null
        } else {
            Value::Text(digest)
        }
    });
    table.rename_column(idx, digest_column_name(column))?;
    debug!(column, "Anonymized column");
    Ok(())
}

fn with_source(err: DomainError, source: &str) -> DomainError {
    match err {
        DomainError::SchemaCollision {
            canonical,
            first,
            second,
            ..
        } => DomainError::SchemaCollision {
            source_name: source.to_string(),
            canonical,
            first,
            second,
        },
        other => other,
    }
}

fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names.into_iter().filter(|n| seen.insert(n.clone())).collect()
}
