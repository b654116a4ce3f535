//! Body Composition Tools
//!
//! Navy-method body-fat estimate and BMI from raw tool arguments.

use crate::body::{
    calculate_bmi_checked, estimate_checked, BmiInput, BmiResult, BodyCompositionInput,
    BodyCompositionResult, Sex,
};
use crate::nutrition::UnitSystem;

/// Parse an optional unit system name, defaulting to imperial
pub fn parse_unit_system(value: Option<&str>) -> Result<UnitSystem, String> {
    match value {
        None => Ok(UnitSystem::default()),
        Some(s) => UnitSystem::from_str(s)
            .ok_or_else(|| format!("Unknown unit system '{}', expected imperial or metric", s)),
    }
}

/// Estimate body fat from tape measurements
pub fn estimate_body_composition(
    sex: &str,
    unit_system: Option<&str>,
    height: f64,
    weight: f64,
    waist: f64,
    neck: f64,
    hip: Option<f64>,
) -> Result<BodyCompositionResult, String> {
    let sex = Sex::from_str(sex)
        .ok_or_else(|| format!("Unknown sex '{}', expected male or female", sex))?;

    let input = BodyCompositionInput {
        sex,
        unit_system: parse_unit_system(unit_system)?,
        height,
        weight,
        waist,
        neck,
        hip,
    };

    estimate_checked(&input).map_err(|e| e.to_string())
}

/// BMI, WHO category and program eligibility
pub fn calculate_bmi(
    unit_system: Option<&str>,
    height: f64,
    weight: f64,
    has_weight_related_condition: bool,
) -> Result<BmiResult, String> {
    let input = BmiInput {
        unit_system: parse_unit_system(unit_system)?,
        height,
        weight,
        has_weight_related_condition,
    };

    calculate_bmi_checked(&input).map_err(|e| e.to_string())
}
