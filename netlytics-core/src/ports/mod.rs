// netlytics-core/src/ports/mod.rs

pub mod table_io;

pub use table_io::{TableReader, TableWriter};
