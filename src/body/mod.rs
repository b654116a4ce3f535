//! Body composition module
//!
//! Navy-method body-fat estimation, category tables and BMI.

pub mod bmi;
pub mod categories;
pub mod navy;

use thiserror::Error;

pub use bmi::{calculate_bmi, calculate_bmi_checked, BmiCategory, BmiInput, BmiResult};
pub use categories::{body_fat_category, chart_position, BodyFatCategory};
pub use navy::{
    estimate, estimate_checked, BodyCompositionInput, BodyCompositionResult, Sex,
    MAX_BODY_FAT_PCT, MIN_BODY_FAT_PCT,
};

/// Rejected form input; nothing is computed when this is returned
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasurementError {
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),

    #[error("{0} is required")]
    Missing(&'static str),
}

/// Check that a measurement is a finite, positive number
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), MeasurementError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MeasurementError::NotPositive(field))
    }
}
