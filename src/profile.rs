//! User clinical profile
//!
//! Only used to label analyses. None of the calculators read it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiabetesType {
    #[serde(alias = "type_1", alias = "T1D")]
    Type1,
    #[serde(alias = "type_2", alias = "T2D")]
    Type2,
    Gestational,
    Prediabetes,
    Other,
}

impl DiabetesType {
    pub fn label(self) -> &'static str {
        match self {
            DiabetesType::Type1 => "Type 1 diabetes",
            DiabetesType::Type2 => "Type 2 diabetes",
            DiabetesType::Gestational => "Gestational diabetes",
            DiabetesType::Prediabetes => "Prediabetes",
            DiabetesType::Other => "Other diabetes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub diabetes_type: Option<DiabetesType>,
    /// mg/dL drop per unit of insulin
    pub insulin_sensitivity_factor: Option<f64>,
    /// grams of carbohydrate covered by one unit
    pub carb_ratio: Option<f64>,
    /// mg/dL
    pub target_glucose: Option<f64>,
}

impl UserProfile {
    /// Short context label, e.g. "Type 1 diabetes (ISF 50 mg/dL/U, ICR 1:10 g)"
    pub fn label(&self) -> String {
        let base = self.diabetes_type.map(DiabetesType::label).unwrap_or("Unspecified profile");

        let mut params = Vec::new();
        if let Some(isf) = self.insulin_sensitivity_factor {
            params.push(format!("ISF {} mg/dL/U", isf));
        }
        if let Some(ratio) = self.carb_ratio {
            params.push(format!("ICR 1:{} g", ratio));
        }
        if let Some(target) = self.target_glucose {
            params.push(format!("target {} mg/dL", target));
        }

        if params.is_empty() {
            base.to_string()
        } else {
            format!("{} ({})", base, params.join(", "))
        }
    }
}

/// Label for an optional profile
pub fn profile_label(profile: Option<&UserProfile>) -> String {
    profile.map(UserProfile::label).unwrap_or_else(|| "Unspecified profile".to_string())
}
