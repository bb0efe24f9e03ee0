//! Weighted 0-100 metabolic score
//!
//! score = tir * 0.5 + variability * 0.3 + hba1c * 0.2
//!
//! Sub-scores are combined unrounded; only the breakdown is rounded for display.

use serde::{Deserialize, Serialize};

use crate::hba1c::HbA1cResult;
use crate::stats::VariabilityResult;
use crate::tir::TirResult;

const W_TIR: f64 = 0.5;
const W_VARIABILITY: f64 = 0.3;
const W_HBA1C: f64 = 0.2;

/// CV at or below which variability scores full marks
const CV_BEST: f64 = 36.0;
/// CV at or above which variability scores zero
const CV_WORST: f64 = 60.0;

const HBA1C_BEST: f64 = 6.5;
const HBA1C_WORST: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Excellent,
    Good,
    Moderate,
    HighRisk,
}

impl ScoreCategory {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreCategory::Excellent,
            65..=79 => ScoreCategory::Good,
            50..=64 => ScoreCategory::Moderate,
            _ => ScoreCategory::HighRisk,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "excellent",
            ScoreCategory::Good => "good",
            ScoreCategory::Moderate => "moderate",
            ScoreCategory::HighRisk => "high_risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub tir_score: u8,
    pub variability_score: u8,
    pub hba1c_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetabolicScoreResult {
    pub score: u8,
    pub category: ScoreCategory,
    pub breakdown: ScoreBreakdown,
}

/// 100 at or below `best`, 0 at or above `worst`, linear in between
fn linear_descending(value: f64, best: f64, worst: f64) -> f64 {
    if value <= best {
        100.0
    } else if value >= worst {
        0.0
    } else {
        100.0 - ((value - best) / (worst - best)) * 100.0
    }
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

pub fn calculate_metabolic_score(
    tir: &TirResult,
    variability: &VariabilityResult,
    hba1c: &HbA1cResult,
) -> MetabolicScoreResult {
    let tir_score = tir.in_range_percent.min(100.0);
    let variability_score = linear_descending(variability.coefficient_of_variation, CV_BEST, CV_WORST);
    let hba1c_score = linear_descending(hba1c.estimated_hba1c, HBA1C_BEST, HBA1C_WORST);

    let score = to_score(tir_score * W_TIR + variability_score * W_VARIABILITY + hba1c_score * W_HBA1C);

    MetabolicScoreResult {
        score,
        category: ScoreCategory::from_score(score),
        breakdown: ScoreBreakdown {
            tir_score: to_score(tir_score),
            variability_score: to_score(variability_score),
            hba1c_score: to_score(hba1c_score),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hba1c::HbA1cCategory;
    use pretty_assertions::assert_eq;

    fn inputs(in_range: f64, cv: f64, a1c: f64) -> (TirResult, VariabilityResult, HbA1cResult) {
        (
            TirResult { in_range_percent: in_range, total_readings: 100, ..TirResult::default() },
            VariabilityResult { mean: 140.0, standard_deviation: 1.4 * cv, coefficient_of_variation: cv },
            HbA1cResult { estimated_hba1c: a1c, category: HbA1cCategory::from_percent(a1c) },
        )
    }

    fn score(in_range: f64, cv: f64, a1c: f64) -> MetabolicScoreResult {
        let (t, v, h) = inputs(in_range, cv, a1c);
        calculate_metabolic_score(&t, &v, &h)
    }

    #[test]
    fn test_score_weighting() {
        assert_eq!(
            score(80.0, 30.0, 6.0),
            MetabolicScoreResult {
                score: 90,
                category: ScoreCategory::Excellent,
                breakdown: ScoreBreakdown { tir_score: 80, variability_score: 100, hba1c_score: 100 },
            }
        );
    }

    #[test]
    fn test_linear_interpolation() {
        // CV 48 is halfway between 36 and 60; A1c 7.75 halfway between 6.5 and 9
        let result = score(60.0, 48.0, 7.75);
        assert_eq!(result.breakdown.variability_score, 50);
        assert_eq!(result.breakdown.hba1c_score, 50);
        assert_eq!(result.score, 55); // 30 + 15 + 10
        assert_eq!(result.category, ScoreCategory::Moderate);
    }

    #[test]
    fn test_sub_score_bounds() {
        let worst = score(0.0, 75.0, 11.0);
        assert_eq!(worst.breakdown, ScoreBreakdown { tir_score: 0, variability_score: 0, hba1c_score: 0 });
        assert_eq!(worst.score, 0);
        assert_eq!(worst.category, ScoreCategory::HighRisk);

        let edges = score(100.0, 36.0, 6.5);
        assert_eq!(edges.score, 100);
        assert_eq!(score(50.0, 60.0, 9.0).breakdown.variability_score, 0);
    }

    #[test]
    fn test_final_score_uses_unrounded_sub_scores() {
        // rounding the tir sub-score first would give round(1 * 0.5) = 1
        let result = score(0.6, 60.0, 9.0);
        assert_eq!(result.breakdown.tir_score, 1);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ScoreCategory::from_score(100), ScoreCategory::Excellent);
        assert_eq!(ScoreCategory::from_score(80), ScoreCategory::Excellent);
        assert_eq!(ScoreCategory::from_score(79), ScoreCategory::Good);
        assert_eq!(ScoreCategory::from_score(65), ScoreCategory::Good);
        assert_eq!(ScoreCategory::from_score(64), ScoreCategory::Moderate);
        assert_eq!(ScoreCategory::from_score(50), ScoreCategory::Moderate);
        assert_eq!(ScoreCategory::from_score(49), ScoreCategory::HighRisk);
    }
}
