// netlytics-core/src/application/mod.rs

pub mod clean;
pub mod pipeline;
pub mod summary;

// --- RE-EXPORTS ---
// `use netlytics_core::application::{run_pipeline, clean_project, PipelineSummary};`

pub use clean::clean_project;
pub use pipeline::run_pipeline;
pub use summary::{FailureKind, PipelineSummary, SourceOutcome, SourceStatus, StatusCounts};
