//! Timestamp parsing for upstream data and user input.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Zone-less layouts the desk API (and people) produce; read as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Minute-precision layouts with an explicit offset (`+01:00` or `+0100`).
const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Parse an ISO-8601 instant.
///
/// Accepts RFC 3339 with any offset, minute-precision instants with a `Z`
/// or numeric offset, plus the zone-less forms in [`NAIVE_FORMATS`].
/// Returns `None` for anything else, including blanks.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(zulu) = raw.strip_suffix(['Z', 'z']) {
        return parse_naive(zulu);
    }

    if let Some(parsed) = ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    parse_naive(raw)
}

fn parse_naive(raw: &str) -> Option<DateTime<Utc>> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
