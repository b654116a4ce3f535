//! Food Lookup Tools
//!
//! Search the food database and scale a chosen serving.

use serde::Serialize;

use crate::lookup::{search_foods as lookup, FoodSource, NutritionSearchResponse};
use crate::models::{Macros, NutritionResult, ServingOption};
use crate::nutrition::{sanitize_quantity, scale};

/// Response for scale_serving
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleServingResponse {
    pub food_name: String,
    pub serving_label: String,
    pub serving_grams: f64,
    pub quantity: f64,
    pub total_grams: f64,
    pub nutrition: Macros,
}

/// Search foods by free text
pub async fn search_foods<S>(source: &S, query: &str) -> Result<NutritionSearchResponse, String>
where
    S: FoodSource + ?Sized,
{
    if query.trim().is_empty() {
        return Err("query cannot be empty".to_string());
    }

    lookup(source, query)
        .await
        .map_err(|e| format!("Nutrition lookup failed: {}", e))
}

/// Pick the serving to scale: a named option of the result, or explicit grams
pub fn resolve_serving(
    result: &NutritionResult,
    serving_label: Option<&str>,
    serving_grams: Option<f64>,
) -> Result<ServingOption, String> {
    match (serving_label, serving_grams) {
        (Some(label), None) => result
            .option(label)
            .cloned()
            .ok_or_else(|| format!("No serving option labeled '{}'", label)),
        (label, Some(grams)) => {
            if !(grams.is_finite() && grams > 0.0) {
                return Err("serving_grams must be greater than 0".to_string());
            }
            let label = label
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} g", crate::nutrition::format_amount(grams)));
            Ok(ServingOption::new(label, grams))
        }
        (None, None) => Err("Provide serving_label or serving_grams".to_string()),
    }
}

/// Scale per-100g values to `quantity` servings
pub fn scale_serving(
    result: &NutritionResult,
    serving: &ServingOption,
    quantity: f64,
) -> ScaleServingResponse {
    let quantity = sanitize_quantity(quantity);

    ScaleServingResponse {
        food_name: result.name.clone(),
        serving_label: serving.label.clone(),
        serving_grams: serving.grams,
        quantity,
        total_grams: quantity * serving.grams,
        nutrition: scale(result, serving, quantity),
    }
}

/// Look a food up again by query and id, then scale one of its servings
pub async fn scale_search_result<S>(
    source: &S,
    query: &str,
    fdc_id: i64,
    serving_label: Option<&str>,
    serving_grams: Option<f64>,
    quantity: f64,
) -> Result<ScaleServingResponse, String>
where
    S: FoodSource + ?Sized,
{
    let response = search_foods(source, query).await?;
    let result = response
        .results
        .iter()
        .find(|r| r.fdc_id == fdc_id)
        .ok_or_else(|| format!("Food {} not found for query '{}'", fdc_id, response.query))?;

    let serving = resolve_serving(result, serving_label, serving_grams)?;
    Ok(scale_serving(result, &serving, quantity))
}
