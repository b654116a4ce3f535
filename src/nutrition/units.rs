//! Unit types and conversion constants
//!
//! Measurement systems for body measurements and the weight units that appear
//! in food-database serving declarations.

use serde::{Deserialize, Serialize};

/// Measurement system a form was filled in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Inches and pounds
    #[default]
    Imperial,
    /// Centimeters and kilograms
    Metric,
}

impl UnitSystem {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "imperial" | "us" => Some(UnitSystem::Imperial),
            "metric" | "si" => Some(UnitSystem::Metric),
            _ => None,
        }
    }

    /// Label for body mass in this system
    pub fn mass_unit(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "lb",
            UnitSystem::Metric => "kg",
        }
    }
}

// ============================================================================
// Body Measurement Constants
// ============================================================================

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

// ============================================================================
// Food Weight Constants (to grams)
// ============================================================================

/// Grams per ounce as offered in serving selectors
pub const G_PER_OZ: f64 = 28.35;
/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

/// Conversion factor to grams for a weight unit.
///
/// Accepts the database's unit codes (`GRM`, `MG`) as well as common spellings.
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "g" | "grm" | "gram" | "grams" => Some(1.0),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "oz" | "onz" | "ounce" | "ounces" => Some(G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(G_PER_LB),
        _ => None,
    }
}

/// Whether a unit is milliliters (`MLT` in database codes)
pub fn is_milliliters(unit: &str) -> bool {
    matches!(
        unit.trim().to_lowercase().as_str(),
        "ml" | "mlt" | "milliliter" | "milliliters" | "millilitre" | "millilitres"
    )
}

/// Format an amount without a trailing `.0`, keeping at most two decimals.
///
/// `30.0` -> `"30"`, `28.35` -> `"28.35"`, `2.50` -> `"2.5"`
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
