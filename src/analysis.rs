//! Full analytics pass
//!
//! Runs every component bottom-up: normalize, merge, TIR and variability,
//! HbA1c from the variability mean, interpretations, summary and score, then
//! recommendations and the clinical report. Each call builds fresh results.

use chrono::FixedOffset;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::circadian::{
    generate_circadian_profile, generate_circadian_profile_at_offset, HourlyProfile,
    DEFAULT_MINIMUM_READINGS_PER_HOUR,
};
use crate::hba1c::{estimate_hba1c, HbA1cResult};
use crate::interpretation::{interpret_tir, interpret_variability, TirClinicalAssessment, VariabilityAssessment};
use crate::normalize::{merge_glucose_readings, normalize_glucose_data, DEFAULT_DUPLICATE_WINDOW_MINUTES};
use crate::profile::{profile_label, UserProfile};
use crate::reading::{GlucoseReading, RawGlucoseEntry};
use crate::recommendations::{generate_recommendations, RecommendationResult};
use crate::report::{generate_clinical_report, generate_metabolic_summary, ClinicalReport, MetabolicSummary};
use crate::score::{calculate_metabolic_score, MetabolicScoreResult};
use crate::stats::{calculate_variability, VariabilityResult};
use crate::tir::{calculate_tir, TirResult};
use crate::units::Thresholds;

/// Tunables for one analytics pass
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub thresholds: Thresholds,
    pub duplicate_window_minutes: i64,
    pub minimum_readings_per_hour: usize,
    /// Zone for hour-of-day grouping; `None` uses local time
    pub utc_offset: Option<FixedOffset>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            duplicate_window_minutes: DEFAULT_DUPLICATE_WINDOW_MINUTES,
            minimum_readings_per_hour: DEFAULT_MINIMUM_READINGS_PER_HOUR,
            utc_offset: None,
        }
    }
}

/// Everything derived from one set of readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicAnalysis {
    pub profile_label: String,
    pub readings_analyzed: usize,
    pub tir: TirResult,
    pub variability: VariabilityResult,
    pub hba1c: HbA1cResult,
    pub tir_assessment: TirClinicalAssessment,
    pub variability_assessment: VariabilityAssessment,
    pub summary: MetabolicSummary,
    pub score: MetabolicScoreResult,
    pub recommendations: RecommendationResult,
    pub report: ClinicalReport,
    pub circadian_profile: Vec<HourlyProfile>,
}

/// Analyze raw entries from a storage collaborator
pub fn analyze(
    entries: &[RawGlucoseEntry],
    options: &AnalysisOptions,
    profile: Option<&UserProfile>,
) -> MetabolicAnalysis {
    let normalized = normalize_glucose_data(entries);
    let merged = merge_glucose_readings(&normalized, options.duplicate_window_minutes);
    info!(
        "Analyzing {} readings ({} raw entries, {} after normalization)",
        merged.len(),
        entries.len(),
        normalized.len()
    );
    analyze_readings(&merged, options, profile)
}

/// Analyze readings that are already normalized and de-duplicated
pub fn analyze_readings(
    readings: &[GlucoseReading],
    options: &AnalysisOptions,
    profile: Option<&UserProfile>,
) -> MetabolicAnalysis {
    let tir = calculate_tir(readings, &options.thresholds);
    let variability = calculate_variability(readings);
    let hba1c = estimate_hba1c(variability.mean);

    let tir_assessment = interpret_tir(&tir);
    let variability_assessment = interpret_variability(&variability);
    let summary = generate_metabolic_summary(&tir, &variability);
    let score = calculate_metabolic_score(&tir, &variability, &hba1c);

    let recommendations = generate_recommendations(&tir, &variability, &hba1c, &score);
    let report = generate_clinical_report(&tir, &variability, &hba1c);

    let circadian_profile = match options.utc_offset {
        Some(offset) => generate_circadian_profile_at_offset(readings, options.minimum_readings_per_hour, offset),
        None => generate_circadian_profile(readings, options.minimum_readings_per_hour),
    };

    debug!(
        "TIR {:.2}%, CV {:.2}%, eA1c {:.2}%, score {} ({})",
        tir.in_range_percent,
        variability.coefficient_of_variation,
        hba1c.estimated_hba1c,
        score.score,
        score.category.label()
    );

    MetabolicAnalysis {
        profile_label: profile_label(profile),
        readings_analyzed: readings.len(),
        tir,
        variability,
        hba1c,
        tir_assessment,
        variability_assessment,
        summary,
        score,
        recommendations,
        report,
        circadian_profile,
    }
}
