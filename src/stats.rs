//! Statistics calculations for glucose readings
//!
//! Glycemic variability uses the population standard deviation (divide by N),
//! the convention for CGM consensus metrics.

use serde::{Deserialize, Serialize};

use crate::reading::GlucoseReading;

/// Round to two decimal places, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a precomputed mean
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Glycemic variability measures, all rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariabilityResult {
    pub mean: f64,
    pub standard_deviation: f64,
    /// Standard deviation as a percentage of the mean; 0 when the mean is 0
    pub coefficient_of_variation: f64,
}

/// Compute mean, SD and CV over the reading values
pub fn calculate_variability(readings: &[GlucoseReading]) -> VariabilityResult {
    if readings.is_empty() {
        return VariabilityResult::default();
    }

    let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
    let mean = mean(&values);
    let std_dev = population_std_dev(&values, mean);
    let cv = if mean != 0.0 { std_dev / mean * 100.0 } else { 0.0 };

    VariabilityResult {
        mean: round2(mean),
        standard_deviation: round2(std_dev),
        coefficient_of_variation: round2(cv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::ReadingSource;
    use chrono::{Duration, TimeZone, Utc};

    fn readings(values: &[f64]) -> Vec<GlucoseReading> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| GlucoseReading::new(v, start + Duration::minutes(15 * i as i64), ReadingSource::Cgm))
            .collect()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_variability_population_sd() {
        // mean 5, population variance 4
        let result = calculate_variability(&readings(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
        assert_eq!(result.mean, 5.0);
        assert_eq!(result.standard_deviation, 2.0);
        assert_eq!(result.coefficient_of_variation, 40.0);
    }

    #[test]
    fn test_variability_rounds_to_two_decimals() {
        let result = calculate_variability(&readings(&[100.0, 120.0, 140.0]));
        assert_eq!(result.mean, 120.0);
        // sqrt(800/3) = 16.3299...
        assert_eq!(result.standard_deviation, 16.33);
        assert_eq!(result.coefficient_of_variation, 13.61);
    }

    #[test]
    fn test_variability_empty() {
        let result = calculate_variability(&[]);
        assert_eq!(result, VariabilityResult { mean: 0.0, standard_deviation: 0.0, coefficient_of_variation: 0.0 });
    }

    #[test]
    fn test_variability_zero_mean_guard() {
        let result = calculate_variability(&readings(&[0.0, 0.0, 0.0]));
        assert_eq!(result.coefficient_of_variation, 0.0);
        assert!(!result.coefficient_of_variation.is_nan());
    }

    #[test]
    fn test_single_reading_has_no_spread() {
        let result = calculate_variability(&readings(&[150.0]));
        assert_eq!(result.mean, 150.0);
        assert_eq!(result.standard_deviation, 0.0);
        assert_eq!(result.coefficient_of_variation, 0.0);
    }
}
