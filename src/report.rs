//! Metabolic summary and clinical report text
//!
//! The summary's four-tier control level uses its own 70/60/40 table and is
//! deliberately kept separate from the three-tier TIR assessment in
//! [`crate::interpretation`].

use serde::{Deserialize, Serialize};

use crate::hba1c::HbA1cResult;
use crate::interpretation::{classify_at_least, variability_status, VariabilityStatus};
use crate::stats::VariabilityResult;
use crate::tir::TirResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl ControlLevel {
    pub fn label(self) -> &'static str {
        match self {
            ControlLevel::Excellent => "excellent",
            ControlLevel::Good => "good",
            ControlLevel::Moderate => "moderate",
            ControlLevel::Poor => "poor",
        }
    }
}

const CONTROL_LEVEL_TABLE: &[(f64, ControlLevel)] = &[
    (70.0, ControlLevel::Excellent),
    (60.0, ControlLevel::Good),
    (40.0, ControlLevel::Moderate),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl From<VariabilityStatus> for RiskLevel {
    fn from(status: VariabilityStatus) -> Self {
        match status {
            VariabilityStatus::Stable => RiskLevel::Low,
            VariabilityStatus::Moderate => RiskLevel::Moderate,
            VariabilityStatus::High => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicSummary {
    pub control_level: ControlLevel,
    pub risk_level: RiskLevel,
    pub summary: String,
}

/// Consolidated one-line assessment of control and variability
pub fn generate_metabolic_summary(tir: &TirResult, variability: &VariabilityResult) -> MetabolicSummary {
    let control_level = classify_at_least(tir.in_range_percent, CONTROL_LEVEL_TABLE, ControlLevel::Poor);
    let risk_level = RiskLevel::from(variability_status(variability));

    let summary = format!(
        "Glucose control is {} ({:.2}% time in range) with {} variability risk (CV {:.2}%).",
        control_level.label(),
        tir.in_range_percent,
        risk_level.label(),
        variability.coefficient_of_variation
    );

    MetabolicSummary { control_level, risk_level, summary }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalReport {
    pub overall_risk: RiskLevel,
    pub headline: String,
    pub details: String,
}

/// Overall clinical risk from TIR, variability and estimated HbA1c
pub fn overall_risk(tir: &TirResult, variability: &VariabilityResult, hba1c: &HbA1cResult) -> RiskLevel {
    let status = variability_status(variability);

    if tir.in_range_percent >= 70.0 && status == VariabilityStatus::Stable && hba1c.estimated_hba1c < 6.5 {
        RiskLevel::Low
    } else if tir.in_range_percent >= 50.0 && status != VariabilityStatus::High {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

pub fn generate_clinical_report(
    tir: &TirResult,
    variability: &VariabilityResult,
    hba1c: &HbA1cResult,
) -> ClinicalReport {
    let overall_risk = overall_risk(tir, variability, hba1c);

    let headline = match overall_risk {
        RiskLevel::Low => "Low metabolic risk: glucose is well controlled and stable.",
        RiskLevel::Moderate => "Moderate metabolic risk: control can be improved.",
        RiskLevel::High => "High metabolic risk: clinical review is recommended.",
    };

    let details = format!(
        "Time in Range: {:.2}%\nCoefficient of Variation: {:.2}%\nEstimated HbA1c: {:.2}%",
        tir.in_range_percent, variability.coefficient_of_variation, hba1c.estimated_hba1c
    );

    ClinicalReport {
        overall_risk,
        headline: headline.to_string(),
        details,
    }
}
