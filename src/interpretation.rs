//! Clinical interpretation of TIR and variability results
//!
//! Cutoffs follow the international consensus on CGM targets: at least 70% time
//! in range, under 4% below range (here, more than 5% very low is treated as a
//! hypoglycemia safety override) and a CV under 36% for stable glucose.

use serde::{Deserialize, Serialize};

use crate::stats::VariabilityResult;
use crate::tir::TirResult;

/// Percentage of very low readings above which TIR is always high risk
pub const VERY_LOW_RISK_PERCENT: f64 = 5.0;

/// Published CV cutoff for stable glucose
pub const STABLE_CV_PERCENT: f64 = 36.0;

/// Pick the level of the first `(threshold, level)` row the value reaches.
/// Rows are ordered from the highest threshold down.
pub(crate) fn classify_at_least<T: Copy>(value: f64, table: &[(f64, T)], fallback: T) -> T {
    table
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|&(_, level)| level)
        .unwrap_or(fallback)
}

/// Pick the level of the first `(threshold, level)` row the value is below.
/// Rows are ordered from the lowest threshold up.
pub(crate) fn classify_below<T: Copy>(value: f64, table: &[(f64, T)], fallback: T) -> T {
    table
        .iter()
        .find(|(threshold, _)| value < *threshold)
        .map(|&(_, level)| level)
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TirStatus {
    HighRisk,
    Excellent,
    Good,
    NeedsImprovement,
}

const TIR_STATUS_TABLE: &[(f64, TirStatus)] = &[(70.0, TirStatus::Excellent), (60.0, TirStatus::Good)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TirClinicalAssessment {
    pub status: TirStatus,
    pub message: String,
    pub recommendation: String,
}

/// Assess time in range. Hypoglycemia exposure overrides the TIR value.
pub fn interpret_tir(tir: &TirResult) -> TirClinicalAssessment {
    let status = if tir.very_low_percent > VERY_LOW_RISK_PERCENT {
        TirStatus::HighRisk
    } else {
        classify_at_least(tir.in_range_percent, TIR_STATUS_TABLE, TirStatus::NeedsImprovement)
    };

    let (message, recommendation) = match status {
        TirStatus::HighRisk => (
            "Frequent severe hypoglycemia detected. This is a safety risk regardless of overall time in range.",
            "Contact your healthcare provider promptly to review insulin doses and hypoglycemia prevention.",
        ),
        TirStatus::Excellent => (
            "Excellent glucose control: at least 70% of readings are within the target range.",
            "Keep up your current routine and continue regular monitoring.",
        ),
        TirStatus::Good => (
            "Good glucose control, slightly below the 70% time-in-range target.",
            "Look for recurring highs or lows around meals to close the remaining gap.",
        ),
        TirStatus::NeedsImprovement => (
            "Time in range is below the recommended target.",
            "Review meal composition, insulin timing and activity with your care team.",
        ),
    };

    TirClinicalAssessment {
        status,
        message: message.to_string(),
        recommendation: recommendation.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariabilityStatus {
    Stable,
    Moderate,
    High,
}

const VARIABILITY_STATUS_TABLE: &[(f64, VariabilityStatus)] = &[
    (STABLE_CV_PERCENT, VariabilityStatus::Stable),
    (50.0, VariabilityStatus::Moderate),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariabilityAssessment {
    pub status: VariabilityStatus,
    pub message: String,
    pub recommendation: String,
}

/// Classify the coefficient of variation
pub fn variability_status(variability: &VariabilityResult) -> VariabilityStatus {
    classify_below(
        variability.coefficient_of_variation,
        VARIABILITY_STATUS_TABLE,
        VariabilityStatus::High,
    )
}

pub fn interpret_variability(variability: &VariabilityResult) -> VariabilityAssessment {
    let status = variability_status(variability);

    let (message, recommendation) = match status {
        VariabilityStatus::Stable => (
            "Glucose levels are stable (CV below 36%).",
            "Maintain your current meal and insulin routine.",
        ),
        VariabilityStatus::Moderate => (
            "Glucose shows moderate variability.",
            "Aim for consistent carbohydrate portions and meal times.",
        ),
        VariabilityStatus::High => (
            "Glucose is highly variable, which raises the risk of hypoglycemia.",
            "Review carbohydrate counting and insulin timing with your care team.",
        ),
    };

    VariabilityAssessment {
        status,
        message: message.to_string(),
        recommendation: recommendation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tir(in_range: f64, very_low: f64) -> TirResult {
        TirResult {
            in_range_percent: in_range,
            very_low_percent: very_low,
            low_percent: 0.0,
            high_percent: 100.0 - in_range - very_low,
            very_high_percent: 0.0,
            total_readings: 100,
        }
    }

    fn cv(value: f64) -> VariabilityResult {
        VariabilityResult { mean: 150.0, standard_deviation: 1.5 * value, coefficient_of_variation: value }
    }

    #[test]
    fn test_tir_statuses() {
        assert_eq!(interpret_tir(&tir(85.0, 0.0)).status, TirStatus::Excellent);
        assert_eq!(interpret_tir(&tir(70.0, 0.0)).status, TirStatus::Excellent);
        assert_eq!(interpret_tir(&tir(69.99, 0.0)).status, TirStatus::Good);
        assert_eq!(interpret_tir(&tir(60.0, 0.0)).status, TirStatus::Good);
        assert_eq!(interpret_tir(&tir(59.0, 0.0)).status, TirStatus::NeedsImprovement);
    }

    #[test]
    fn test_hypoglycemia_overrides_tir() {
        assert_eq!(interpret_tir(&tir(90.0, 5.01)).status, TirStatus::HighRisk);
        assert_eq!(interpret_tir(&tir(90.0, 5.0)).status, TirStatus::Excellent);
    }

    #[test]
    fn test_tir_messages_are_fixed() {
        let a = interpret_tir(&tir(85.0, 0.0));
        let b = interpret_tir(&tir(99.0, 0.0));
        assert_eq!(a, b);
        assert!(!a.recommendation.is_empty());
    }

    #[test]
    fn test_variability_statuses() {
        assert_eq!(interpret_variability(&cv(20.0)).status, VariabilityStatus::Stable);
        assert_eq!(interpret_variability(&cv(36.0)).status, VariabilityStatus::Moderate);
        assert_eq!(interpret_variability(&cv(49.99)).status, VariabilityStatus::Moderate);
        assert_eq!(interpret_variability(&cv(50.0)).status, VariabilityStatus::High);
    }

    #[test]
    fn test_threshold_tables() {
        let table = [(10.0, 'a'), (5.0, 'b')];
        assert_eq!(classify_at_least(12.0, &table, 'z'), 'a');
        assert_eq!(classify_at_least(5.0, &table, 'z'), 'b');
        assert_eq!(classify_at_least(1.0, &table, 'z'), 'z');

        let table = [(5.0, 'a'), (10.0, 'b')];
        assert_eq!(classify_below(1.0, &table, 'z'), 'a');
        assert_eq!(classify_below(5.0, &table, 'z'), 'b');
        assert_eq!(classify_below(10.0, &table, 'z'), 'z');
    }
}
