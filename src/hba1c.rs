//! Estimated HbA1c from mean glucose
//!
//! Inverts the ADAG regression `eAG = 28.7 * A1c - 46.7` (mg/dL).

use serde::{Deserialize, Serialize};

use crate::stats::round2;

const ADAG_SLOPE: f64 = 28.7;
const ADAG_INTERCEPT: f64 = 46.7;

/// Clinical category of an HbA1c percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HbA1cCategory {
    Normal,
    Prediabetes,
    Diabetes,
    PoorControl,
}

impl HbA1cCategory {
    pub fn from_percent(hba1c: f64) -> Self {
        if hba1c < 5.7 {
            HbA1cCategory::Normal
        } else if hba1c < 6.5 {
            HbA1cCategory::Prediabetes
        } else if hba1c < 8.0 {
            HbA1cCategory::Diabetes
        } else {
            HbA1cCategory::PoorControl
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HbA1cCategory::Normal => "Normal",
            HbA1cCategory::Prediabetes => "Prediabetes",
            HbA1cCategory::Diabetes => "Diabetes",
            HbA1cCategory::PoorControl => "Poor control",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HbA1cResult {
    pub estimated_hba1c: f64,
    pub category: HbA1cCategory,
}

/// Estimate HbA1c (%) from mean glucose in mg/dL
pub fn estimate_hba1c(mean_glucose: f64) -> HbA1cResult {
    let estimated = round2((mean_glucose + ADAG_INTERCEPT) / ADAG_SLOPE);
    HbA1cResult {
        estimated_hba1c: estimated,
        category: HbA1cCategory::from_percent(estimated),
    }
}
