// netlytics-core/src/domain/table/value.rs

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A typed cell of a cleaned table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Timestamp(DateTime<Utc>),
    Bool(bool),
    Int(i64),
}

impl Value {
    /// Blank or whitespace-only text is treated as missing.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Null
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text form used in cleaned CSV files. Missing values are empty cells.
    pub fn to_field(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Value {
    fn from(ts: Option<DateTime<Utc>>) -> Self {
        ts.map_or(Self::Null, Self::Timestamp)
    }
}
