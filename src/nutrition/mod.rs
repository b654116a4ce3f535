//! Nutrition module
//!
//! Food record normalization, serving scaling and unit conversions.

pub mod normalizer;
pub mod scaling;
pub mod units;

pub use normalizer::{build_serving_options, normalize, standard_options, SERVING_TOLERANCE_G};
pub use scaling::{parse_quantity, per_100g, sanitize_quantity, scale, scale_exact, scale_per_100g};
pub use units::{format_amount, grams_per_unit, UnitSystem, G_PER_OZ};
