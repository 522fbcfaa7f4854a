// netlytics-core/src/domain/normalize/mod.rs

pub mod datetime;
pub mod header;

pub use datetime::{ParsedColumn, REFERENCE_TIMEZONE, parse_datetime, parse_datetime_column};
pub use header::{canonicalize_header, has_token, mentions_hint};
