//! Wire format of the desk API and its conversion into typed desks.
//!
//! Upstream desks carry two parallel arrays, `bookings` and `attendances`.
//! Each raw entry is parsed on its own so that one corrupt record is
//! rejected without taking the rest of the desk down with it.

pub mod timestamp;

pub use timestamp::parse_timestamp;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use deskbook_core::error::AppError;
use deskbook_core::types::{EntryId, LocationId};

use crate::desk::Desk;
use crate::schedule::{EntryKind, EntryStatus, ScheduleEntry};

/// A desk as returned by the directory endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskRecord {
    /// Backend identifier; JSON strings and numbers are both accepted.
    #[serde(deserialize_with = "lenient_location_id")]
    pub location_id: LocationId,
    /// Backend display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw booking objects. `null` and absent both mean empty.
    #[serde(default)]
    pub bookings: Option<Vec<Value>>,
    /// Raw attendance objects. `null` and absent both mean empty.
    #[serde(default)]
    pub attendances: Option<Vec<Value>>,
}

/// One raw booking or attendance.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleRecord {
    #[serde(default, deserialize_with = "lenient_entry_id")]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "startTime")]
    start: Option<String>,
    #[serde(default, alias = "endTime")]
    end: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
}

/// An entry dropped during conversion, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// Collection the entry came from.
    pub kind: EntryKind,
    /// Position in that collection.
    pub index: usize,
    /// Upstream id, when one could be read.
    pub id: Option<EntryId>,
    /// Why the entry was dropped.
    pub reason: String,
}

/// Result of converting a [`DeskRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeskConversion {
    /// The typed desk holding every entry that converted cleanly.
    pub desk: Desk,
    /// Entries that were dropped.
    pub rejected: Vec<RejectedEntry>,
}

impl DeskRecord {
    /// Convert into a typed [`Desk`], rejecting malformed entries one by one.
    pub fn into_desk(self) -> DeskConversion {
        let mut schedule = Vec::new();
        let mut rejected = Vec::new();

        let collections = [
            (EntryKind::Booking, self.bookings.unwrap_or_default()),
            (EntryKind::Attendance, self.attendances.unwrap_or_default()),
        ];

        for (kind, raws) in collections {
            for (index, raw) in raws.into_iter().enumerate() {
                match convert_entry(kind, index, raw) {
                    Ok(entry) => schedule.push(entry),
                    Err(rejection) => rejected.push(rejection),
                }
            }
        }

        DeskConversion {
            desk: Desk {
                location_id: self.location_id,
                name: self.name,
                schedule,
            },
            rejected,
        }
    }
}

fn convert_entry(kind: EntryKind, index: usize, raw: Value) -> Result<ScheduleEntry, RejectedEntry> {
    let reject = |id: Option<EntryId>, reason: String| RejectedEntry {
        kind,
        index,
        id,
        reason,
    };

    let record: ScheduleRecord =
        serde_json::from_value(raw).map_err(|e| reject(None, format!("unreadable record: {e}")))?;

    let id = EntryId::new(
        record
            .id
            .unwrap_or_else(|| format!("{}-{index}", kind.as_str())),
    );

    let status = match record.status.as_deref() {
        Some(raw_status) => raw_status
            .parse::<EntryStatus>()
            .map_err(|_| reject(Some(id.clone()), format!("unknown status '{raw_status}'")))?,
        None => return Err(reject(Some(id), "missing status".to_string())),
    };

    let start = match record.start.as_deref() {
        Some(raw_start) => parse_timestamp(raw_start)
            .ok_or_else(|| reject(Some(id.clone()), format!("unparsable start '{raw_start}'")))?,
        None => return Err(reject(Some(id), "missing start".to_string())),
    };

    let end = match record.end.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw_end) => Some(
            parse_timestamp(raw_end)
                .ok_or_else(|| reject(Some(id.clone()), format!("unparsable end '{raw_end}'")))?,
        ),
    };

    if let Some(end) = end {
        if end < start {
            return Err(reject(Some(id), "end precedes start".to_string()));
        }
    }

    Ok(ScheduleEntry {
        id,
        kind,
        status,
        start,
        end,
        holder: record.user_name,
    })
}

/// Parse a directory listing.
///
/// The body is either a JSON array of desks or an object with a `desks`
/// array. Desks that do not deserialize (typically a missing
/// `locationId`) are skipped with a warning; only a body that is not a
/// desk list at all is an error.
pub fn parse_directory(body: &str) -> Result<Vec<DeskRecord>, AppError> {
    let value: Value = serde_json::from_str(body)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("desks") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(AppError::validation(
                    "Directory response has no 'desks' array",
                ));
            }
        },
        _ => {
            return Err(AppError::validation(
                "Directory response is neither an array nor an object",
            ));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<DeskRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(index, error = %e, "Skipping unreadable desk record"),
        }
    }

    Ok(records)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

fn lenient_location_id<'de, D>(deserializer: D) -> Result<LocationId, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(|v| LocationId::new(v.into_string()))
}

fn lenient_entry_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(StringOrNumber::into_string))
}
