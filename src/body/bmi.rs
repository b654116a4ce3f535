//! BMI and program eligibility
//!
//! Used by the weight-loss program funnel to pre-screen visitors.

use serde::{Deserialize, Serialize};

use crate::nutrition::units::UnitSystem;

use super::{require_positive, MeasurementError};

/// BMI at or above which anyone qualifies
pub const ELIGIBLE_BMI: f64 = 30.0;
/// BMI at or above which a weight-related condition qualifies
pub const ELIGIBLE_BMI_WITH_CONDITION: f64 = 27.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Inches or centimeters
    pub height: f64,
    /// Pounds or kilograms
    pub weight: f64,
    /// Diagnosed weight-related condition (hypertension, type 2 diabetes, ...)
    #[serde(default)]
    pub has_weight_related_condition: bool,
}

/// WHO adult weight categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    /// Rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_name: &'static str,
    pub eligible: bool,
}

/// Compute BMI, category and eligibility. Assumes positive height and weight.
pub fn calculate_bmi(input: &BmiInput) -> BmiResult {
    let raw = match input.unit_system {
        UnitSystem::Imperial => 703.0 * input.weight / (input.height * input.height),
        UnitSystem::Metric => {
            let meters = input.height / 100.0;
            input.weight / (meters * meters)
        }
    };
    let bmi = (raw * 10.0).round() / 10.0;
    let category = BmiCategory::from_bmi(bmi);

    let eligible = bmi >= ELIGIBLE_BMI
        || (bmi >= ELIGIBLE_BMI_WITH_CONDITION && input.has_weight_related_condition);

    BmiResult {
        bmi,
        category,
        category_name: category.display_name(),
        eligible,
    }
}

/// Validate, then calculate
pub fn calculate_bmi_checked(input: &BmiInput) -> Result<BmiResult, MeasurementError> {
    require_positive("height", input.height)?;
    require_positive("weight", input.weight)?;
    Ok(calculate_bmi(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imperial(height: f64, weight: f64, condition: bool) -> BmiInput {
        BmiInput {
            unit_system: UnitSystem::Imperial,
            height,
            weight,
            has_weight_related_condition: condition,
        }
    }

    #[test]
    fn test_imperial_bmi() {
        let result = calculate_bmi(&imperial(70.0, 180.0, false));
        assert_eq!(result.bmi, 25.8);
        assert_eq!(result.category, BmiCategory::Overweight);
        assert!(!result.eligible);
    }

    #[test]
    fn test_metric_bmi() {
        let result = calculate_bmi(&BmiInput {
            unit_system: UnitSystem::Metric,
            height: 180.0,
            weight: 100.0,
            has_weight_related_condition: false,
        });
        assert_eq!(result.bmi, 30.9);
        assert_eq!(result.category, BmiCategory::Obese);
        assert!(result.eligible);
    }

    #[test]
    fn test_condition_lowers_threshold() {
        // 28.0 BMI at 5'10"
        let weight = 28.0 * 70.0 * 70.0 / 703.0;
        assert!(!calculate_bmi(&imperial(70.0, weight, false)).eligible);
        assert!(calculate_bmi(&imperial(70.0, weight, true)).eligible);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_checked_rejects_zero_height() {
        assert_eq!(
            calculate_bmi_checked(&imperial(0.0, 180.0, false)),
            Err(MeasurementError::NotPositive("height"))
        );
    }
}
