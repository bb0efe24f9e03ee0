//! Rule-based recommendations
//!
//! Rules fire independently and are listed in declaration order, not sorted by
//! priority. The two score rules are mutually exclusive.

use serde::{Deserialize, Serialize};

use crate::hba1c::HbA1cResult;
use crate::interpretation::STABLE_CV_PERCENT;
use crate::score::MetabolicScoreResult;
use crate::stats::VariabilityResult;
use crate::tir::TirResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub message: String,
}

impl Recommendation {
    fn new(priority: Priority, message: &str) -> Self {
        Self { priority, message: message.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
}

pub fn generate_recommendations(
    tir: &TirResult,
    variability: &VariabilityResult,
    hba1c: &HbA1cResult,
    score: &MetabolicScoreResult,
) -> RecommendationResult {
    let mut recommendations = Vec::new();

    if tir.in_range_percent < 50.0 {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Less than half of your readings are in range. Review meal and insulin timing with your care team.",
        ));
    }

    if variability.coefficient_of_variation >= STABLE_CV_PERCENT {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Glucose variability is high. Reduce carbohydrate spikes by spreading carbs across meals.",
        ));
    }

    if hba1c.estimated_hba1c >= 6.5 {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Estimated HbA1c is in the diabetes range. Discuss long-term glucose control at your next visit.",
        ));
    }

    if score.score >= 80 {
        recommendations.push(Recommendation::new(
            Priority::Low,
            "Great work! Your metabolic control is excellent, keep up your current habits.",
        ));
    } else if score.score < 50 {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Your metabolic score is low. Focus on stabilizing glucose fluctuations.",
        ));
    }

    RecommendationResult {
        summary: format!("Metabolic Score: {}/100 ({})", score.score, score.category.label()),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hba1c::HbA1cCategory;
    use crate::score::{ScoreBreakdown, ScoreCategory};

    fn run(in_range: f64, cv: f64, a1c: f64, score: u8) -> RecommendationResult {
        let tir = TirResult { in_range_percent: in_range, total_readings: 50, ..TirResult::default() };
        let variability = VariabilityResult { mean: 150.0, standard_deviation: 1.5 * cv, coefficient_of_variation: cv };
        let hba1c = HbA1cResult { estimated_hba1c: a1c, category: HbA1cCategory::from_percent(a1c) };
        let score = MetabolicScoreResult {
            score,
            category: ScoreCategory::from_score(score),
            breakdown: ScoreBreakdown { tir_score: 0, variability_score: 0, hba1c_score: 0 },
        };
        generate_recommendations(&tir, &variability, &hba1c, &score)
    }

    fn priorities(result: &RecommendationResult) -> Vec<Priority> {
        result.recommendations.iter().map(|r| r.priority).collect()
    }

    #[test]
    fn test_rules_fire_independently_in_declaration_order() {
        let result = run(40.0, 45.0, 7.0, 55);
        assert_eq!(priorities(&result), vec![Priority::High, Priority::High, Priority::Medium]);
        assert!(result.recommendations[0].message.contains("meal and insulin timing"));
        assert!(result.recommendations[1].message.contains("carbohydrate spikes"));
        assert!(result.recommendations[2].message.contains("long-term"));
    }

    #[test]
    fn test_excellent_score_gets_reinforcement() {
        let result = run(85.0, 25.0, 6.0, 90);
        assert_eq!(priorities(&result), vec![Priority::Low]);
        assert_eq!(result.summary, "Metabolic Score: 90/100 (excellent)");
    }

    #[test]
    fn test_low_score_rule_is_exclusive() {
        let result = run(30.0, 55.0, 9.5, 20);
        assert_eq!(priorities(&result), vec![Priority::High, Priority::High, Priority::Medium, Priority::High]);
        assert_eq!(result.summary, "Metabolic Score: 20/100 (high_risk)");
    }

    #[test]
    fn test_middle_scores_add_nothing() {
        for score in [50, 65, 79] {
            assert!(run(75.0, 20.0, 6.0, score).recommendations.is_empty());
        }
    }

    #[test]
    fn test_rule_boundaries() {
        // 50% TIR, CV just under 36 and A1c just under 6.5 fire nothing
        assert!(run(50.0, 35.99, 6.49, 70).recommendations.is_empty());
        assert_eq!(priorities(&run(75.0, 36.0, 6.5, 70)), vec![Priority::High, Priority::Medium]);
    }
}
