//! Food search models
//!
//! `FoodRecord` mirrors one entry of a FoodData Central search response.
//! `NutritionResult` is the per-100g view handed to callers.

use serde::{Deserialize, Serialize};

/// One nutrient value on a food record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    pub nutrient_id: u32,
    #[serde(default)]
    pub nutrient_name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// A vendor-supplied household measure ("1 cup, chopped" = 160 g)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodMeasure {
    #[serde(default)]
    pub dissemination_text: Option<String>,
    #[serde(default)]
    pub gram_weight: f64,
    #[serde(default)]
    pub measure_unit_name: Option<String>,
    #[serde(default)]
    pub modifier: Option<String>,
}

/// Raw food record from the upstream food database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    pub fdc_id: i64,
    pub description: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
    #[serde(default)]
    pub serving_size: Option<f64>,
    #[serde(default)]
    pub serving_size_unit: Option<String>,
    #[serde(default)]
    pub household_serving_full_text: Option<String>,
    #[serde(default)]
    pub food_measures: Vec<FoodMeasure>,
}

/// A named quantity of a food and its weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingOption {
    pub label: String,
    pub grams: f64,
}

impl ServingOption {
    pub fn new(label: impl Into<String>, grams: f64) -> Self {
        Self {
            label: label.into(),
            grams,
        }
    }
}

/// Normalized search result, nutrients per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionResult {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fdc_id: i64,
    pub serving_size: f64,
    pub serving_size_unit: String,
    pub household_serving: String,
    pub serving_options: Vec<ServingOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
}

impl NutritionResult {
    /// Find a serving option by its label
    pub fn option(&self, label: &str) -> Option<&ServingOption> {
        self.serving_options.iter().find(|o| o.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_from_upstream_json() {
        let json = r#"{
            "fdcId": 171688,
            "description": "Apples, raw, with skin",
            "foodNutrients": [
                {"nutrientId": 1008, "nutrientName": "Energy", "unitName": "KCAL", "value": 52},
                {"nutrientId": 1003, "nutrientName": "Protein", "unitName": "G"}
            ],
            "foodMeasures": [
                {"disseminationText": "1 cup, sliced", "gramWeight": 109, "measureUnitName": "cup"}
            ],
            "score": 812.4
        }"#;

        let record: FoodRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fdc_id, 171688);
        assert_eq!(record.food_nutrients.len(), 2);
        assert_eq!(record.food_nutrients[1].value, None);
        assert_eq!(record.food_measures[0].gram_weight, 109.0);
        assert!(record.serving_size.is_none());
        assert!(record.brand_name.is_none());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = NutritionResult {
            name: "Bar".to_string(),
            calories: 400.0,
            protein: 20.0,
            carbs: 40.0,
            fat: 15.0,
            fdc_id: 1,
            serving_size: 30.0,
            serving_size_unit: "g".to_string(),
            household_serving: "1 bar".to_string(),
            serving_options: vec![ServingOption::new("1 bar", 30.0)],
            brand_name: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["fdcId"], 1);
        assert_eq!(value["servingOptions"][0]["label"], "1 bar");
        assert!(value.get("brandName").is_none());
    }
}
