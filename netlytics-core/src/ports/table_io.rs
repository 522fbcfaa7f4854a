// netlytics-core/src/ports/table_io.rs
//
// What the orchestrator needs from storage, without knowing it is CSV on disk.

use crate::domain::table::{RawTable, Table};
use crate::infrastructure::error::InfrastructureError;
use std::path::Path;

pub trait TableReader: Send + Sync {
    /// Reads one raw file. `expected_columns` (canonical names) help locate the
    /// header row when the file starts with notes.
    fn read(&self, path: &Path, expected_columns: &[&str]) -> Result<RawTable, InfrastructureError>;
}

pub trait TableWriter: Send + Sync {
    /// Writes `table`, fully replacing any previous file at `path`.
    fn write(&self, table: &Table, path: &Path) -> Result<(), InfrastructureError>;

    /// Removes a previous run's file at `path`, if any.
    fn discard(&self, path: &Path) -> Result<(), InfrastructureError>;
}
