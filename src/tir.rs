//! Time-in-range calculation
//!
//! Readings are bucketed with [`Thresholds::classify`]; buckets are disjoint so
//! the five percentages partition the input.

use serde::{Deserialize, Serialize};

use crate::reading::GlucoseReading;
use crate::stats::round2;
use crate::units::{GlucoseRange, Thresholds};

/// Time-in-range distribution, percentages rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TirResult {
    pub in_range_percent: f64,
    pub low_percent: f64,
    pub very_low_percent: f64,
    pub high_percent: f64,
    pub very_high_percent: f64,
    pub total_readings: usize,
}

impl TirResult {
    /// Percentage for a given range
    pub fn percentage(&self, range: GlucoseRange) -> f64 {
        match range {
            GlucoseRange::VeryLow => self.very_low_percent,
            GlucoseRange::Low => self.low_percent,
            GlucoseRange::InRange => self.in_range_percent,
            GlucoseRange::High => self.high_percent,
            GlucoseRange::VeryHigh => self.very_high_percent,
        }
    }

    /// Combined time below range (very low + low)
    pub fn below_range_percent(&self) -> f64 {
        round2(self.very_low_percent + self.low_percent)
    }

    /// Combined time above range (high + very high)
    pub fn above_range_percent(&self) -> f64 {
        round2(self.high_percent + self.very_high_percent)
    }
}

/// Classify every reading and compute the percentage in each band
pub fn calculate_tir(readings: &[GlucoseReading], thresholds: &Thresholds) -> TirResult {
    let total = readings.len();
    if total == 0 {
        return TirResult::default();
    }

    let (mut very_low, mut low, mut in_range, mut high, mut very_high) = (0usize, 0usize, 0usize, 0usize, 0usize);
    for reading in readings {
        match thresholds.classify(reading.value) {
            GlucoseRange::VeryLow => very_low += 1,
            GlucoseRange::Low => low += 1,
            GlucoseRange::InRange => in_range += 1,
            GlucoseRange::High => high += 1,
            GlucoseRange::VeryHigh => very_high += 1,
        }
    }

    let percent = |count: usize| round2(count as f64 / total as f64 * 100.0);

    TirResult {
        in_range_percent: percent(in_range),
        low_percent: percent(low),
        very_low_percent: percent(very_low),
        high_percent: percent(high),
        very_high_percent: percent(very_high),
        total_readings: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::ReadingSource;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn readings(values: &[f64]) -> Vec<GlucoseReading> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| GlucoseReading::new(v, start + Duration::minutes(5 * i as i64), ReadingSource::Cgm))
            .collect()
    }

    fn sum(tir: &TirResult) -> f64 {
        tir.in_range_percent + tir.low_percent + tir.very_low_percent + tir.high_percent + tir.very_high_percent
    }

    #[test]
    fn test_time_in_range() {
        let tir = calculate_tir(&readings(&[50.0, 65.0, 100.0, 150.0, 200.0, 300.0]), &Thresholds::default());

        assert_eq!(tir.total_readings, 6);
        assert_eq!(tir.very_low_percent, 16.67);
        assert_eq!(tir.low_percent, 16.67);
        assert_eq!(tir.in_range_percent, 33.33);
        assert_eq!(tir.high_percent, 16.67);
        assert_eq!(tir.very_high_percent, 16.67);
        assert!((sum(&tir) - 100.0).abs() <= 0.05);
    }

    #[test]
    fn test_boundary_values_are_in_range() {
        let tir = calculate_tir(&readings(&[70.0, 180.0]), &Thresholds::default());
        assert_eq!(tir.in_range_percent, 100.0);
        assert_eq!(tir.low_percent, 0.0);
        assert_eq!(tir.high_percent, 0.0);
    }

    #[test]
    fn test_outer_boundaries_fall_to_adjacent_band() {
        let tir = calculate_tir(&readings(&[54.0, 250.0]), &Thresholds::default());
        assert_eq!(tir.low_percent, 50.0);
        assert_eq!(tir.very_low_percent, 0.0);
        assert_eq!(tir.high_percent, 50.0);
        assert_eq!(tir.very_high_percent, 0.0);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        assert_eq!(calculate_tir(&[], &Thresholds::default()), TirResult::default());
    }

    #[test]
    fn test_partition_over_many_sets() {
        let thresholds = Thresholds::default();
        for n in 1..60 {
            let values: Vec<f64> = (0..n).map(|i| 30.0 + (i * 37 % 300) as f64).collect();
            let tir = calculate_tir(&readings(&values), &thresholds);
            assert_eq!(tir.total_readings, n);
            assert!((sum(&tir) - 100.0).abs() <= 0.05, "n={} sum={}", n, sum(&tir));
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let tight = Thresholds { low_threshold: 70.0, high_threshold: 140.0, ..Thresholds::default() };
        let tir = calculate_tir(&readings(&[100.0, 150.0]), &tight);
        assert_eq!(tir.in_range_percent, 50.0);
        assert_eq!(tir.high_percent, 50.0);
    }

    #[test]
    fn test_combined_ranges() {
        let tir = calculate_tir(&readings(&[50.0, 60.0, 100.0, 200.0]), &Thresholds::default());
        assert_eq!(tir.below_range_percent(), 50.0);
        assert_eq!(tir.above_range_percent(), 25.0);
        assert_eq!(tir.percentage(GlucoseRange::InRange), 25.0);
    }
}
