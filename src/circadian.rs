//! Hour-of-day glucose profile
//!
//! Groups readings by the hour they were taken in a given time zone. Hours
//! without readings are omitted, so the profile may be sparse.

use std::collections::BTreeMap;

use chrono::{FixedOffset, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::reading::GlucoseReading;
use crate::stats::{mean, round2};

pub const DEFAULT_MINIMUM_READINGS_PER_HOUR: usize = 3;

/// How much an hourly average can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// `High` from twice the minimum, `Medium` from the minimum
    pub fn from_count(count: usize, minimum_readings_per_hour: usize) -> Self {
        if count >= minimum_readings_per_hour.saturating_mul(2) {
            Confidence::High
        } else if count >= minimum_readings_per_hour {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Average glucose for one hour of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyProfile {
    pub hour: u8,
    pub average_glucose: f64,
    pub readings_count: usize,
    pub confidence: Confidence,
}

/// Build the profile in the machine's local time zone
pub fn generate_circadian_profile(
    readings: &[GlucoseReading],
    minimum_readings_per_hour: usize,
) -> Vec<HourlyProfile> {
    generate_circadian_profile_in(readings, minimum_readings_per_hour, &Local)
}

/// Build the profile with hours taken at a fixed UTC offset
pub fn generate_circadian_profile_at_offset(
    readings: &[GlucoseReading],
    minimum_readings_per_hour: usize,
    offset: FixedOffset,
) -> Vec<HourlyProfile> {
    generate_circadian_profile_in(readings, minimum_readings_per_hour, &offset)
}

fn generate_circadian_profile_in<Tz: TimeZone>(
    readings: &[GlucoseReading],
    minimum_readings_per_hour: usize,
    zone: &Tz,
) -> Vec<HourlyProfile> {
    let mut by_hour: BTreeMap<u8, Vec<f64>> = BTreeMap::new();

    for reading in readings {
        let hour = reading.timestamp.with_timezone(zone).hour() as u8;
        by_hour.entry(hour).or_default().push(reading.value);
    }

    by_hour
        .into_iter()
        .map(|(hour, values)| HourlyProfile {
            hour,
            average_glucose: round2(mean(&values)),
            readings_count: values.len(),
            confidence: Confidence::from_count(values.len(), minimum_readings_per_hour),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::ReadingSource;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn reading(value: f64, day: u32, hour: u32, minute: u32) -> GlucoseReading {
        GlucoseReading::new(
            value,
            Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap(),
            ReadingSource::Glucometer,
        )
    }

    #[test]
    fn test_profile_groups_by_hour_and_sorts() {
        let readings = vec![
            reading(150.0, 1, 13, 0),
            reading(100.0, 1, 7, 10),
            reading(110.0, 2, 7, 40),
            reading(120.0, 3, 7, 5),
            reading(160.0, 2, 13, 30),
        ];

        let profile = generate_circadian_profile_at_offset(&readings, 3, FixedOffset::east_opt(0).unwrap());

        assert_eq!(
            profile,
            vec![
                HourlyProfile { hour: 7, average_glucose: 110.0, readings_count: 3, confidence: Confidence::Medium },
                HourlyProfile { hour: 13, average_glucose: 155.0, readings_count: 2, confidence: Confidence::Low },
            ]
        );
    }

    #[test]
    fn test_profile_respects_offset() {
        let readings = vec![reading(100.0, 1, 23, 30)];
        let profile = generate_circadian_profile_at_offset(&readings, 3, FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(profile[0].hour, 1);
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(Confidence::from_count(1, 3), Confidence::Low);
        assert_eq!(Confidence::from_count(3, 3), Confidence::Medium);
        assert_eq!(Confidence::from_count(5, 3), Confidence::Medium);
        assert_eq!(Confidence::from_count(6, 3), Confidence::High);
        assert_eq!(Confidence::from_count(2, 1), Confidence::High);
        assert_eq!(Confidence::from_count(usize::MAX, usize::MAX), Confidence::Medium);
        assert_eq!(Confidence::from_count(10, usize::MAX), Confidence::Low);
    }

    #[test]
    fn test_empty_profile() {
        assert!(generate_circadian_profile(&[], DEFAULT_MINIMUM_READINGS_PER_HOUR).is_empty());
    }

    #[test]
    fn test_local_profile_covers_every_reading() {
        let readings: Vec<GlucoseReading> = (0..24).map(|h| reading(100.0 + h as f64, 1, h, 0)).collect();
        let profile = generate_circadian_profile(&readings, 1);
        assert_eq!(profile.len(), 24);
        assert_eq!(profile.iter().map(|p| p.readings_count).sum::<usize>(), 24);
        assert!(profile.windows(2).all(|w| w[0].hour < w[1].hour));
    }
}
