// netlytics-core/src/domain/governance/mod.rs

pub mod keywords;
pub mod masking;
pub mod quality;

// Re-exports
pub use keywords::{KeywordScanner, KeywordSet, OUTCOME_SIGNALS, classify};
pub use masking::{DIGEST_SUFFIX, EMPTY_DIGEST, anonymize, digest_column_name};
pub use quality::QualityReport;
