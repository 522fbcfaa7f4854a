// netlytics-core/src/infrastructure/csv/reader.rs

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, instrument, warn};

use crate::domain::normalize::canonicalize_header;
use crate::domain::project::PipelineConfig;
use crate::domain::table::RawTable;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::TableReader;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads LinkedIn export CSVs: tolerant of encodings, note preambles and the
/// odd ragged row, strict when a file is mostly garbage.
#[derive(Debug, Clone)]
pub struct CsvTableReader {
    malformed_row_threshold: f64,
    preamble_scan_lines: usize,
}

impl Default for CsvTableReader {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl CsvTableReader {
    pub fn new(malformed_row_threshold: f64, preamble_scan_lines: usize) -> Self {
        Self {
            malformed_row_threshold,
            preamble_scan_lines: preamble_scan_lines.max(1),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.malformed_row_threshold, config.preamble_scan_lines)
    }

    /// Parses already-decoded CSV text. `label` names the input in errors.
    pub fn parse(
        &self,
        text: &str,
        expected_columns: &[&str],
        label: &str,
    ) -> Result<RawTable, InfrastructureError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records: Vec<StringRecord> = Vec::new();
        let mut unreadable = 0usize;
        for result in rdr.records() {
            match result {
                Ok(record) if is_blank_line(&record) => {}
                Ok(record) => records.push(record),
                Err(e) => {
                    unreadable += 1;
                    debug!(input = label, error = %e, "Unreadable record");
                }
            }
        }

        let header_idx = self
            .locate_header(&records, expected_columns)
            .ok_or_else(|| InfrastructureError::EmptyFile(label.to_string()))?;
        if header_idx > 0 {
            info!(input = label, skipped = header_idx, "Skipped preamble before header row");
        }

        let headers: Vec<String> = records[header_idx].iter().map(str::to_string).collect();
        let width = headers.len();

        let mut rows = Vec::with_capacity(records.len() - header_idx - 1);
        let mut malformed = unreadable;
        for record in &records[header_idx + 1..] {
            if record.len() == width {
                rows.push(record.iter().map(str::to_string).collect());
            } else {
                malformed += 1;
                debug!(
                    input = label,
                    line = record.position().map(|p| p.line()),
                    expected = width,
                    found = record.len(),
                    "Skipping malformed row"
                );
            }
        }

        let total = rows.len() + malformed;
        if total > 0 && malformed as f64 / total as f64 > self.malformed_row_threshold {
            return Err(InfrastructureError::MalformedFile {
                path: label.to_string(),
                malformed,
                total,
            });
        }
        if malformed > 0 {
            warn!(input = label, malformed, total, "Skipped malformed rows");
        }

        Ok(RawTable::new(headers, rows)?.with_malformed_rows(malformed))
    }

    /// First record among the leading ones that holds every expected column.
    /// Otherwise the earliest of the widest leading records; note lines are
    /// single-field.
    fn locate_header(&self, records: &[StringRecord], expected_columns: &[&str]) -> Option<usize> {
        if records.is_empty() {
            return None;
        }
        if expected_columns.is_empty() {
            return Some(0);
        }

        let scanned = &records[..records.len().min(self.preamble_scan_lines)];
        let found = scanned.iter().position(|record| {
            let names: Vec<String> = record.iter().map(canonicalize_header).collect();
            expected_columns
                .iter()
                .all(|expected| names.iter().any(|n| n == expected))
        });
        if found.is_some() {
            return found;
        }

        let widest = scanned.iter().map(StringRecord::len).max().unwrap_or(0);
        scanned.iter().position(|record| record.len() == widest)
    }
}

impl TableReader for CsvTableReader {
    #[instrument(skip(self, expected_columns), fields(path = %path.display()))]
    fn read(&self, path: &Path, expected_columns: &[&str]) -> Result<RawTable, InfrastructureError> {
        let bytes = fs::read(path)?;
        let label = path.display().to_string();
        let text = decode(&bytes, &label);
        let table = self.parse(&text, expected_columns, &label)?;
        info!(rows = table.len(), columns = table.headers().len(), "Loaded raw file");
        Ok(table)
    }
}

/// UTF-8 (BOM stripped), falling back to Latin-1 which accepts any byte.
fn decode<'a>(bytes: &'a [u8], label: &str) -> Cow<'a, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            warn!(input = label, error = %e, "UTF-8 decoding failed, using Latin-1");
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
        }
    }
}

fn is_blank_line(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(|f| f.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::atomic_write;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_quoted_fields_with_commas() -> Result<()> {
        let text = "Date,Link,Message\n2024-01-01,https://x,\"Hello, \"\"world\"\"\nsecond line\"\n";
        let table = CsvTableReader::default().parse(text, &["date", "message"], "comments")?;
        assert_eq!(table.headers(), &["Date", "Link", "Message"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][2], "Hello, \"world\"\nsecond line");
        Ok(())
    }

    #[test]
    fn test_linkedin_notes_preamble_skipped() -> Result<()> {
        let text = "Notes:\n\"When exporting your connection data, you may notice that some of the email addresses are missing.\"\n\nFirst Name,Last Name,URL,Email Address,Company,Position,Connected On\nAda,Lovelace,https://x,,Analytical,Engineer,10 Dec 2023\n";
        let table = CsvTableReader::default().parse(
            text,
            &["first_name", "last_name", "connected_on"],
            "connections",
        )?;
        assert_eq!(table.headers()[0], "First Name");
        assert_eq!(table.len(), 1);
        assert_eq!(table.malformed_rows(), 0);
        Ok(())
    }

    #[test]
    fn test_renamed_column_still_finds_header_after_notes() -> Result<()> {
        let text = "Notes:\n\"Some email addresses may be missing.\"\n\nFirst Name,Last Name,URL,Email Address,Company,Position,Connected Date\nAda,Lovelace,https://x,,Analytical,Engineer,10 Dec 2023\n";
        let table = CsvTableReader::default().parse(
            text,
            &["first_name", "last_name", "connected_on"],
            "connections",
        )?;
        assert_eq!(table.headers()[0], "First Name");
        assert_eq!(table.headers()[6], "Connected Date");
        assert_eq!(table.len(), 1);
        assert_eq!(table.malformed_rows(), 0);
        Ok(())
    }

    #[test]
    fn test_ragged_rows_skipped_and_counted() -> Result<()> {
        let text = "a,b,c\n1,2,3\n4,5\n6,7,8\n9,10,11,12\n13,14,15\n";
        let table = CsvTableReader::default().parse(text, &[], "t")?;
        assert_eq!(table.len(), 3);
        assert_eq!(table.malformed_rows(), 2);
        Ok(())
    }

    #[test]
    fn test_pervasive_malformation_rejects_file() {
        let text = "a,b,c\n1\n2\n3,4,5\n6\n";
        let res = CsvTableReader::new(0.5, 10).parse(text, &[], "t");
        assert!(matches!(
            res,
            Err(InfrastructureError::MalformedFile {
                malformed: 3,
                total: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_file() {
        let res = CsvTableReader::default().parse("", &["date"], "empty.csv");
        assert!(matches!(res, Err(InfrastructureError::EmptyFile(_))));
    }

    #[test]
    fn test_bom_and_latin1_fallback() -> Result<()> {
        let dir = tempdir()?;

        let bom_path = dir.path().join("bom.csv");
        let mut bom = UTF8_BOM.to_vec();
        bom.extend_from_slice(b"Date,Message\n2024-01-01,hi\n");
        atomic_write(&bom_path, bom)?;
        let table = CsvTableReader::default().read(&bom_path, &["date"])?;
        assert_eq!(table.headers()[0], "Date");

        let latin_path = dir.path().join("latin1.csv");
        atomic_write(&latin_path, b"Date,Message\n2024-01-01,caf\xE9\n")?;
        let table = CsvTableReader::default().read(&latin_path, &["date"])?;
        assert_eq!(table.rows()[0][1], "café");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let res = CsvTableReader::default().read(Path::new("/nonexistent/x.csv"), &[]);
        assert!(matches!(res, Err(InfrastructureError::Io(_))));
    }
}
