//! Glucose reading data model and raw ingestion types
//!
//! Raw entries arrive from storage collaborators in mixed shapes: ISO strings,
//! Firestore-style `{seconds, nanoseconds}` timestamp objects, meter exports
//! with a `"mg/dL"` key. They are resolved once, in [`crate::normalize`], into
//! canonical [`GlucoseReading`] values.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Where a reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSource {
    Glucometer,
    Cgm,
    #[default]
    Manual,
}

/// A canonical blood glucose reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseReading {
    /// Glucose in mg/dL, finite and non-negative
    pub value: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub source: ReadingSource,
}

impl GlucoseReading {
    pub fn new(value: f64, timestamp: DateTime<Utc>, source: ReadingSource) -> Self {
        Self { value, timestamp, source }
    }

    /// ISO-8601 form of the timestamp, millisecond precision
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
fn serialize_timestamp<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Capability of an external timestamp handle to produce an instant
pub trait ToDate {
    fn to_date(&self) -> Option<DateTime<Utc>>;
}

/// Firestore-like timestamp object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTimestamp {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    #[serde(alias = "_nanoseconds", default)]
    pub nanoseconds: u32,
}

impl ToDate for ExternalTimestamp {
    fn to_date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }
}

/// Timestamp as supplied by the collaborator, before resolution
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Iso(String),
    External(ExternalTimestamp),
    #[default]
    Missing,
    Other(serde_json::Value),
}

impl RawTimestamp {
    /// Resolve to an instant, or `None` when the timestamp is unusable
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Iso(text) => parse_timestamp(text),
            RawTimestamp::External(handle) => handle.to_date(),
            RawTimestamp::Missing | RawTimestamp::Other(_) => None,
        }
    }
}

impl From<&str> for RawTimestamp {
    fn from(text: &str) -> Self {
        RawTimestamp::Iso(text.to_string())
    }
}

impl From<String> for RawTimestamp {
    fn from(text: String) -> Self {
        RawTimestamp::Iso(text)
    }
}

impl From<ExternalTimestamp> for RawTimestamp {
    fn from(handle: ExternalTimestamp) -> Self {
        RawTimestamp::External(handle)
    }
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        RawTimestamp::External(ExternalTimestamp {
            seconds: instant.timestamp(),
            nanoseconds: instant.timestamp_subsec_nanos(),
        })
    }
}

/// Unvalidated glucose entry as read from storage or a meter export
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawGlucoseEntry {
    #[serde(alias = "mg/dL", default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub timestamp: RawTimestamp,
    #[serde(default)]
    pub source: Option<ReadingSource>,
}

impl RawGlucoseEntry {
    pub fn new(value: f64, timestamp: impl Into<RawTimestamp>) -> Self {
        Self {
            value: Some(value),
            timestamp: timestamp.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: ReadingSource) -> Self {
        self.source = Some(source);
        self
    }
}

/// Naive date-time layouts accepted without an offset, read as local time
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M", // meter export
];

/// Parse a timestamp string.
///
/// Accepts RFC 3339, naive date-times (local time) and bare dates (UTC midnight).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
