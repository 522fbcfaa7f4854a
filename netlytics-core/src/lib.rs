// netlytics-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL LAYERS ---

// Contracts between the pipeline and storage (TableReader, TableWriter).
pub mod ports;

// Normalization, standardization and per-source cleaning rules.
// Depends on nothing else in the crate.
pub mod domain;

// Adapters: CSV files, YAML config, atomic filesystem writes.
pub mod infrastructure;

// Use cases: pipeline run, clean.
pub mod application;

pub mod error;

pub use error::NetlyticsError;
