//! Glucose normalization and duplicate merging
//!
//! Ingestion is best effort: entries that cannot become a valid
//! [`GlucoseReading`] are dropped and logged, never reported as errors.

use chrono::Duration;
use log::{debug, info};

use crate::reading::{GlucoseReading, RawGlucoseEntry};

/// Default window inside which two readings count as the same measurement
pub const DEFAULT_DUPLICATE_WINDOW_MINUTES: i64 = 5;

/// Resolve raw entries into canonical readings, preserving input order.
///
/// Entries with an unresolvable timestamp, or a missing, non-finite or negative
/// value, are dropped. A missing source defaults to manual.
pub fn normalize_glucose_data(entries: &[RawGlucoseEntry]) -> Vec<GlucoseReading> {
    let readings: Vec<GlucoseReading> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let Some(timestamp) = entry.timestamp.resolve() else {
                debug!("Dropping entry #{}: unresolvable timestamp {:?}", index, entry.timestamp);
                return None;
            };
            let value = match entry.value {
                Some(v) if v.is_finite() && v >= 0.0 => v,
                other => {
                    debug!("Dropping entry #{}: invalid value {:?}", index, other);
                    return None;
                }
            };
            Some(GlucoseReading {
                value,
                timestamp,
                source: entry.source.unwrap_or_default(),
            })
        })
        .collect();

    let dropped = entries.len() - readings.len();
    if dropped > 0 {
        info!("Normalized {} of {} entries ({} dropped)", readings.len(), entries.len(), dropped);
    }

    readings
}

/// Sort readings ascending by time and drop duplicates.
///
/// A reading is a duplicate when an already accepted reading lies within
/// `duplicate_window_minutes` of it. On time-sorted input the last accepted
/// reading is always the nearest accepted one, so a single sweep suffices.
pub fn merge_glucose_readings(
    readings: &[GlucoseReading],
    duplicate_window_minutes: i64,
) -> Vec<GlucoseReading> {
    if readings.is_empty() {
        return Vec::new();
    }

    // negative windows behave as zero; windows beyond the representable range are unbounded
    let window = Duration::try_minutes(duplicate_window_minutes.max(0));
    let mut sorted = readings.to_vec();
    // stable, so equal timestamps keep input order
    sorted.sort_by_key(|r| r.timestamp);

    let mut merged: Vec<GlucoseReading> = Vec::with_capacity(sorted.len());
    for reading in sorted {
        let duplicate = merged
            .last()
            .is_some_and(|last| window.map_or(true, |w| reading.timestamp - last.timestamp <= w));
        if !duplicate {
            merged.push(reading);
        }
    }

    debug!(
        "Merged {} readings into {} ({}-minute window)",
        readings.len(),
        merged.len(),
        duplicate_window_minutes
    );

    merged
}
