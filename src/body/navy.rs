//! Navy-method body-fat estimation
//!
//! Circumference regression in inches:
//!
//! ```text
//! male:   86.010 × log10(waist − neck) − 70.041 × log10(height) + 36.76
//! female: 163.205 × log10(waist + hip − neck) − 97.684 × log10(height) − 78.387
//! ```
//!
//! The male/female split is part of the published formula.

use serde::{Deserialize, Serialize};

use crate::nutrition::units::{cm_to_inches, UnitSystem};

use super::categories::{body_fat_category, chart_position, BodyFatCategory};
use super::{require_positive, MeasurementError};

/// Lowest estimate the formula is trusted for
pub const MIN_BODY_FAT_PCT: f64 = 3.0;
/// Highest estimate the formula is trusted for
pub const MAX_BODY_FAT_PCT: f64 = 60.0;

/// Formula selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Form input, lengths and weight in `unit_system`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyCompositionInput {
    pub sex: Sex,
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub height: f64,
    pub weight: f64,
    pub waist: f64,
    pub neck: f64,
    #[serde(default)]
    pub hip: Option<f64>,
}

/// Measurements converted to inches / pounds
#[derive(Debug, Clone, Copy, PartialEq)]
struct ImperialMeasurements {
    height: f64,
    waist: f64,
    neck: f64,
    hip: f64,
}

impl BodyCompositionInput {
    /// Reject incomplete or non-positive measurements
    pub fn validate(&self) -> Result<(), MeasurementError> {
        require_positive("height", self.height)?;
        require_positive("weight", self.weight)?;
        require_positive("waist", self.waist)?;
        require_positive("neck", self.neck)?;

        if self.sex == Sex::Female {
            match self.hip {
                Some(hip) => require_positive("hip", hip)?,
                None => return Err(MeasurementError::Missing("hip")),
            }
        }

        Ok(())
    }

    fn to_imperial(&self) -> ImperialMeasurements {
        let length = |value: f64| match self.unit_system {
            UnitSystem::Imperial => value,
            UnitSystem::Metric => cm_to_inches(value),
        };

        ImperialMeasurements {
            height: length(self.height),
            waist: length(self.waist),
            neck: length(self.neck),
            hip: length(self.hip.unwrap_or(0.0)),
        }
    }
}

/// Estimated body composition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyCompositionResult {
    pub sex: Sex,
    /// Clamped to [3, 60]
    pub body_fat_percentage: f64,
    /// In the input's mass unit
    pub fat_mass: f64,
    pub lean_mass: f64,
    pub mass_unit: &'static str,
    pub category: BodyFatCategory,
    /// Marker position on the 0-100 scale
    pub chart_position: f64,
}

/// Raw regression value before clamping
fn regression(sex: Sex, m: &ImperialMeasurements) -> f64 {
    match sex {
        Sex::Male => 86.010 * (m.waist - m.neck).log10() - 70.041 * m.height.log10() + 36.76,
        Sex::Female => {
            163.205 * (m.waist + m.hip - m.neck).log10() - 97.684 * m.height.log10() - 78.387
        }
    }
}

/// Clamp into the formula's validity range.
///
/// A circumference difference <= 0 makes the logarithm undefined; that reads
/// as the floor.
fn clamp_percentage(raw: f64) -> f64 {
    if raw.is_nan() {
        MIN_BODY_FAT_PCT
    } else {
        raw.clamp(MIN_BODY_FAT_PCT, MAX_BODY_FAT_PCT)
    }
}

/// Estimate body composition. Assumes `input` has passed `validate`.
pub fn estimate(input: &BodyCompositionInput) -> BodyCompositionResult {
    let measurements = input.to_imperial();
    let body_fat_percentage = clamp_percentage(regression(input.sex, &measurements));

    let fat_mass = body_fat_percentage / 100.0 * input.weight;
    let lean_mass = input.weight - fat_mass;

    BodyCompositionResult {
        sex: input.sex,
        body_fat_percentage,
        fat_mass,
        lean_mass,
        mass_unit: input.unit_system.mass_unit(),
        category: body_fat_category(input.sex, body_fat_percentage),
        chart_position: chart_position(input.sex, body_fat_percentage),
    }
}

/// Validate, then estimate
pub fn estimate_checked(
    input: &BodyCompositionInput,
) -> Result<BodyCompositionResult, MeasurementError> {
    input.validate()?;
    Ok(estimate(input))
}
