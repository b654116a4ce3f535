//! Data models
//!
//! Food search records, normalized results, macros and food log entries.

mod food;
mod food_log;
mod nutrition;

pub use food::{FoodMeasure, FoodNutrient, FoodRecord, NutritionResult, ServingOption};
pub use food_log::{FoodLogEntry, FoodLogEntryCreate};
pub use nutrition::Macros;
