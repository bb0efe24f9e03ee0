//! Clinical metabolic analytics for blood glucose readings
//!
//! A pipeline of pure functions: raw entries are normalized and de-duplicated,
//! then reduced to time-in-range, glycemic variability and estimated HbA1c.
//! Those feed clinical interpretations, a consolidated summary and report, a
//! weighted 0-100 metabolic score and rule-based recommendations.
//!
//! Nothing here holds state or performs I/O outside of [`config`]; every
//! function can be called concurrently.

pub mod analysis;
pub mod circadian;
pub mod config;
pub mod error;
pub mod hba1c;
pub mod interpretation;
pub mod normalize;
pub mod profile;
pub mod reading;
pub mod recommendations;
pub mod report;
pub mod score;
pub mod stats;
pub mod tir;
pub mod units;

pub use analysis::{analyze, analyze_readings, AnalysisOptions, MetabolicAnalysis};
pub use circadian::{generate_circadian_profile, generate_circadian_profile_at_offset, Confidence, HourlyProfile};
pub use error::InsightsError;
pub use hba1c::{estimate_hba1c, HbA1cCategory, HbA1cResult};
pub use interpretation::{interpret_tir, interpret_variability, TirClinicalAssessment, VariabilityAssessment};
pub use normalize::{merge_glucose_readings, normalize_glucose_data};
pub use profile::{DiabetesType, UserProfile};
pub use reading::{ExternalTimestamp, GlucoseReading, RawGlucoseEntry, RawTimestamp, ReadingSource, ToDate};
pub use recommendations::{generate_recommendations, Priority, Recommendation, RecommendationResult};
pub use report::{generate_clinical_report, generate_metabolic_summary, ClinicalReport, MetabolicSummary};
pub use score::{calculate_metabolic_score, MetabolicScoreResult, ScoreCategory};
pub use stats::{calculate_variability, VariabilityResult};
pub use tir::{calculate_tir, TirResult};
pub use units::{GlucoseRange, GlucoseUnit, Thresholds};
