//! Serving-option normalizer
//!
//! Turns a raw food record into per-100g macros plus the list of serving
//! options shown in a quantity selector.

use crate::models::{FoodMeasure, FoodRecord, NutritionResult, ServingOption};

use super::units::{format_amount, grams_per_unit, is_milliliters, G_PER_OZ};

// ============================================================================
// Nutrient Identifiers
// ============================================================================

/// Energy (kcal)
pub const NUTRIENT_ENERGY: u32 = 1008;
/// Energy, Atwater general factors (kcal)
pub const NUTRIENT_ENERGY_ATWATER_GENERAL: u32 = 2047;
/// Energy, Atwater specific factors (kcal)
pub const NUTRIENT_ENERGY_ATWATER_SPECIFIC: u32 = 2048;
/// Protein (g)
pub const NUTRIENT_PROTEIN: u32 = 1003;
/// Total lipid / fat (g)
pub const NUTRIENT_FAT: u32 = 1004;
/// Carbohydrate, by difference (g)
pub const NUTRIENT_CARBS: u32 = 1005;

/// Two serving weights closer than this are the same serving
pub const SERVING_TOLERANCE_G: f64 = 0.1;

/// Serving size assumed when the record declares none
pub const DEFAULT_SERVING_SIZE: f64 = 100.0;
pub const DEFAULT_SERVING_UNIT: &str = "g";

/// Entries every option list carries, matched by label
pub fn standard_options() -> [ServingOption; 3] {
    [
        ServingOption::new("1 g", 1.0),
        ServingOption::new("1 oz", G_PER_OZ),
        ServingOption::new("100 g", 100.0),
    ]
}

/// Normalize a food record into a `NutritionResult`.
///
/// Total over any record: missing nutrients are 0, missing serving data falls
/// back to 100 g.
pub fn normalize(record: &FoodRecord) -> NutritionResult {
    let calories = [
        NUTRIENT_ENERGY,
        NUTRIENT_ENERGY_ATWATER_GENERAL,
        NUTRIENT_ENERGY_ATWATER_SPECIFIC,
    ]
    .iter()
    .find_map(|&id| nutrient_value(record, id))
    .unwrap_or(0.0);

    let declared = declared_serving(record);

    let (serving_size, serving_size_unit) = match &declared {
        Some((size, unit, _)) => (*size, unit.clone()),
        None => (DEFAULT_SERVING_SIZE, DEFAULT_SERVING_UNIT.to_string()),
    };

    let household_serving = non_empty(record.household_serving_full_text.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}{}", format_amount(serving_size), serving_size_unit));

    NutritionResult {
        name: record.description.trim().to_string(),
        calories,
        protein: nutrient_value(record, NUTRIENT_PROTEIN).unwrap_or(0.0),
        carbs: nutrient_value(record, NUTRIENT_CARBS).unwrap_or(0.0),
        fat: nutrient_value(record, NUTRIENT_FAT).unwrap_or(0.0),
        fdc_id: record.fdc_id,
        serving_size,
        serving_size_unit,
        household_serving,
        serving_options: build_serving_options(record),
        brand_name: non_empty(record.brand_name.as_deref()).map(str::to_string),
    }
}

/// Build the sorted, de-duplicated serving option list for a record
pub fn build_serving_options(record: &FoodRecord) -> Vec<ServingOption> {
    let mut options: Vec<ServingOption> = Vec::new();

    for measure in &record.food_measures {
        if !(measure.gram_weight.is_finite() && measure.gram_weight > 0.0) {
            continue;
        }
        let option = ServingOption::new(measure_label(measure), measure.gram_weight);
        if !has_weight(&options, option.grams) {
            options.push(option);
        }
    }

    if let Some((size, unit, grams)) = declared_serving(record) {
        if grams > 0.0 && !has_weight(&options, grams) {
            let label = non_empty(record.household_serving_full_text.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("1 serving ({}{})", format_amount(size), unit));
            options.insert(0, ServingOption::new(label, grams));
        }
    }

    for standard in standard_options() {
        let labelled = options.iter().any(|o| o.label == standard.label);
        // A vendor entry at the same weight already stands in for it
        if !labelled && !has_weight(&options, standard.grams) {
            options.push(standard);
        }
    }

    options.sort_by(|a, b| a.grams.total_cmp(&b.grams));
    options
}

/// Label for a vendor measure: display text, modifier, unit name, then weight
fn measure_label(measure: &FoodMeasure) -> String {
    non_empty(measure.dissemination_text.as_deref())
        .or_else(|| non_empty(measure.modifier.as_deref()))
        .or_else(|| {
            non_empty(measure.measure_unit_name.as_deref())
                .filter(|name| !name.eq_ignore_ascii_case("undetermined"))
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}g", measure.gram_weight.round() as i64))
}

/// Declared serving as (size, unit, grams)
fn declared_serving(record: &FoodRecord) -> Option<(f64, String, f64)> {
    let size = record.serving_size.filter(|s| s.is_finite() && *s > 0.0)?;
    let unit = non_empty(record.serving_size_unit.as_deref()).unwrap_or(DEFAULT_SERVING_UNIT);

    // Liquids are offered at water density
    let grams = grams_per_unit(unit).map(|factor| size * factor).unwrap_or(size);

    Some((size, display_unit(unit), grams))
}

/// Database unit codes (`GRM`, `MLT`) shown the way people write them
fn display_unit(unit: &str) -> String {
    if grams_per_unit(unit) == Some(1.0) {
        "g".to_string()
    } else if is_milliliters(unit) {
        "ml".to_string()
    } else {
        unit.to_lowercase()
    }
}

fn nutrient_value(record: &FoodRecord, nutrient_id: u32) -> Option<f64> {
    record
        .food_nutrients
        .iter()
        .find(|n| n.nutrient_id == nutrient_id)
        .map(|n| match n.value {
            Some(v) if v.is_finite() => v.max(0.0),
            _ => 0.0,
        })
}

fn has_weight(options: &[ServingOption], grams: f64) -> bool {
    options
        .iter()
        .any(|o| (o.grams - grams).abs() < SERVING_TOLERANCE_G)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
