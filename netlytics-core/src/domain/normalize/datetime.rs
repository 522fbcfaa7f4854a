// netlytics-core/src/domain/normalize/datetime.rs
//
// Every value is parsed independently: LinkedIn has changed its date layout
// between exports, so one column may mix formats.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, warn};

/// Naive values are read in this zone. It never changes at runtime.
pub const REFERENCE_TIMEZONE: Utc = Utc;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Formats carrying an explicit offset.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%.f %z"];

/// Naive date-times, tried in order. `%Y` before `%y` so that four-digit years win;
/// two-digit years parsed by `%Y` land outside the plausible range and fall through.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%y, %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parsed column plus the number of non-blank values no format accepted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedColumn {
    pub values: Vec<Option<DateTime<Utc>>>,
    pub failures: usize,
}

/// Parses one value. Returns `None` for blanks and for unrecognised text.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return plausible(dt.with_timezone(&Utc));
    }

    // "2023-05-12 14:33:01 UTC" as found in messages exports
    let s = s.strip_suffix(" UTC").unwrap_or(s);

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt)
            && let Some(utc) = plausible(dt.with_timezone(&Utc))
        {
            return Some(utc);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt)
            && let Some(utc) = plausible(REFERENCE_TIMEZONE.from_utc_datetime(&naive))
        {
            return Some(utc);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt)
            && let Some(naive) = date.and_hms_opt(0, 0, 0)
            && let Some(utc) = plausible(REFERENCE_TIMEZONE.from_utc_datetime(&naive))
        {
            return Some(utc);
        }
    }

    parse_epoch(s)
}

/// Parses a whole column, counting failures instead of aborting.
pub fn parse_datetime_column<'a, I>(column: &str, values: I) -> ParsedColumn
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut parsed = ParsedColumn::default();

    for value in values {
        let result = match value {
            Some(raw) if !raw.trim().is_empty() => {
                let ts = parse_datetime(raw);
                if ts.is_none() {
                    parsed.failures += 1;
                    debug!(column, value = raw, "Unrecognised datetime");
                }
                ts
            }
            _ => None,
        };
        parsed.values.push(result);
    }

    if parsed.failures > 0 {
        warn!(
            column,
            failures = parsed.failures,
            total = parsed.values.len(),
            "Datetime values could not be parsed and were set to missing"
        );
    }

    parsed
}

fn parse_epoch(s: &str) -> Option<DateTime<Utc>> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: i64 = s.parse().ok()?;
    let ts = match s.len() {
        9 | 10 => Utc.timestamp_opt(n, 0).single()?,
        12 | 13 => Utc.timestamp_millis_opt(n).single()?,
        _ => return None,
    };
    plausible(ts)
}

fn plausible(ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (MIN_YEAR..=MAX_YEAR).contains(&ts.year()).then_some(ts)
}
