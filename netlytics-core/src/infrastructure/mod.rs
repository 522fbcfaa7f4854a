// netlytics-core/src/infrastructure/mod.rs

pub mod config;
pub mod csv;
pub mod error;
pub mod fs;

pub use self::csv::{CsvTableReader, CsvTableWriter};
