//! Serving scaling
//!
//! Converts a per-100g result, a chosen serving and a quantity into the
//! nutrient numbers that get displayed and logged.

use crate::models::{Macros, NutritionResult, ServingOption};

/// Sanitize a quantity multiplier: anything negative or non-finite is 0
pub fn sanitize_quantity(quantity: f64) -> f64 {
    if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        0.0
    }
}

/// Parse a user-entered quantity; unparsable or invalid text is 0
pub fn parse_quantity(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(sanitize_quantity)
        .unwrap_or(0.0)
}

/// Per-100g macros of a result
pub fn per_100g(result: &NutritionResult) -> Macros {
    Macros::new(result.calories, result.protein, result.carbs, result.fat)
}

/// Unrounded nutrients for `quantity` servings of `option`
pub fn scale_exact(result: &NutritionResult, option: &ServingOption, quantity: f64) -> Macros {
    scale_per_100g(per_100g(result), option, quantity)
}

/// Unrounded nutrients from bare per-100g values
pub fn scale_per_100g(per_100g: Macros, option: &ServingOption, quantity: f64) -> Macros {
    let grams = sanitize_quantity(quantity) * option.grams.max(0.0);
    per_100g.scale(grams / 100.0)
}

/// Nutrients for `quantity` servings of `option`, each rounded to a whole
/// kcal / gram
pub fn scale(result: &NutritionResult, option: &ServingOption, quantity: f64) -> Macros {
    scale_exact(result, option, quantity).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> NutritionResult {
        NutritionResult {
            name: "Apple".to_string(),
            calories: 52.0,
            protein: 0.26,
            carbs: 13.81,
            fat: 0.17,
            fdc_id: 171688,
            serving_size: 100.0,
            serving_size_unit: "g".to_string(),
            household_serving: "100g".to_string(),
            serving_options: vec![ServingOption::new("1 cup", 240.0)],
            brand_name: None,
        }
    }

    #[test]
    fn test_scale_cup_example() {
        let cup = ServingOption::new("1 cup", 240.0);
        let logged = scale(&apple(), &cup, 2.5);
        assert_eq!(logged.calories, 312.0);
        assert_eq!(logged.protein, 2.0);
        assert_eq!(logged.carbs, 83.0);
        assert_eq!(logged.fat, 1.0);
    }

    #[test]
    fn test_scale_exact_is_linear_in_quantity() {
        let result = apple();
        let option = ServingOption::new("1 oz", 28.35);
        let one = scale_exact(&result, &option, 1.0);
        for q in [0.0, 0.5, 1.0, 3.0, 7.25] {
            let scaled = scale_exact(&result, &option, q);
            let expected = one.scale(q);
            assert!((scaled.calories - expected.calories).abs() < 1e-9);
            assert!((scaled.carbs - expected.carbs).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_quantity_is_zero() {
        let option = ServingOption::new("1 g", 1.0);
        assert_eq!(scale(&apple(), &option, -2.0), Macros::zero());
        assert_eq!(scale(&apple(), &option, f64::NAN), Macros::zero());
        assert_eq!(parse_quantity("abc"), 0.0);
        assert_eq!(parse_quantity("-1"), 0.0);
        assert_eq!(parse_quantity(" 1.5 "), 1.5);
    }
}
