//! Glucose unit types, range thresholds and classification
//!
//! All analytics run on mg/dL values. mmol/L only exists for display, using the
//! same 18.0 factor as the meter firmware.
//!
//! Range thresholds follow the ADA consensus bands and are configurable.

use serde::{Deserialize, Serialize};

/// mg/dL per mmol/L
pub const MGDL_PER_MMOL: f64 = 18.0;

/// Glucose value in mg/dL (milligrams per deciliter)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MgDl(pub f64);

/// Glucose value in mmol/L (millimoles per liter)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MmolL(pub f64);

impl MgDl {
    /// Format the value with unit suffix
    pub fn format(self) -> String {
        format!("{:.0} mg/dL", self.0)
    }

    pub fn to_mmol(self) -> MmolL {
        MmolL(self.0 / MGDL_PER_MMOL)
    }
}

impl MmolL {
    /// Format the value with unit suffix
    pub fn format(self) -> String {
        format!("{:.1} mmol/L", self.0)
    }

    pub fn to_mgdl(self) -> MgDl {
        MgDl(self.0 * MGDL_PER_MMOL)
    }
}

/// User's preferred display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GlucoseUnit {
    #[serde(rename = "mg/dL")]
    #[default]
    MgDl,
    #[serde(rename = "mmol/L")]
    MmolL,
}

impl GlucoseUnit {
    /// Format an mg/dL value in this unit, with suffix
    pub fn format(self, mg_dl: f64) -> String {
        match self {
            GlucoseUnit::MgDl => MgDl(mg_dl).format(),
            GlucoseUnit::MmolL => MgDl(mg_dl).to_mmol().format(),
        }
    }

    /// Get the unit label
    pub fn label(self) -> &'static str {
        match self {
            GlucoseUnit::MgDl => "mg/dL",
            GlucoseUnit::MmolL => "mmol/L",
        }
    }

    /// Parse a unit label as written in config files and on the command line
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "mg/dl" | "mgdl" => Some(GlucoseUnit::MgDl),
            "mmol/l" | "mmol" => Some(GlucoseUnit::MmolL),
            _ => None,
        }
    }
}

/// Clinical threshold ranges for glucose levels, in mg/dL
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    /// Severe hypoglycemia threshold - default 54
    pub very_low_threshold: f64,
    /// Low threshold - default 70
    pub low_threshold: f64,
    /// High threshold - default 180
    pub high_threshold: f64,
    /// Severe hyperglycemia threshold - default 250
    pub very_high_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            very_low_threshold: 54.0,
            low_threshold: 70.0,
            high_threshold: 180.0,
            very_high_threshold: 250.0,
        }
    }
}

impl Thresholds {
    /// Classify a reading.
    ///
    /// Comparisons are strict and checked in the order very low, low, very high,
    /// high. A value sitting exactly on a threshold lands in the less severe band.
    pub fn classify(&self, mg_dl: f64) -> GlucoseRange {
        if mg_dl < self.very_low_threshold {
            GlucoseRange::VeryLow
        } else if mg_dl < self.low_threshold {
            GlucoseRange::Low
        } else if mg_dl > self.very_high_threshold {
            GlucoseRange::VeryHigh
        } else if mg_dl > self.high_threshold {
            GlucoseRange::High
        } else {
            GlucoseRange::InRange
        }
    }

    /// Get target range display string for the user's unit
    pub fn format_range(&self, unit: GlucoseUnit) -> String {
        match unit {
            GlucoseUnit::MgDl => format!("{:.0}-{:.0} mg/dL", self.low_threshold, self.high_threshold),
            GlucoseUnit::MmolL => format!(
                "{:.1}-{:.1} mmol/L",
                self.low_threshold / MGDL_PER_MMOL,
                self.high_threshold / MGDL_PER_MMOL
            ),
        }
    }
}

/// Classification of glucose value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseRange {
    VeryLow,  // below very_low_threshold - severe hypoglycemia
    Low,      // very_low_threshold to low_threshold
    InRange,  // low_threshold to high_threshold, inclusive
    High,     // high_threshold to very_high_threshold
    VeryHigh, // above very_high_threshold
}

impl GlucoseRange {
    /// Get a display label for the range
    pub fn label(self) -> &'static str {
        match self {
            GlucoseRange::VeryLow => "Very Low",
            GlucoseRange::Low => "Low",
            GlucoseRange::InRange => "In Range",
            GlucoseRange::High => "High",
            GlucoseRange::VeryHigh => "Very High",
        }
    }
}
