// netlytics-core/src/infrastructure/csv/mod.rs

pub mod reader;
pub mod writer;

pub use reader::CsvTableReader;
pub use writer::CsvTableWriter;
