//! Body-fat categories and chart mapping
//!
//! Threshold tables from the Navy-method reference charts. The tables are
//! sex specific and must stay exactly as published.

use serde::Serialize;

use super::navy::Sex;

/// A qualitative body-fat band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BodyFatCategory {
    pub name: &'static str,
    pub color: &'static str,
}

/// (upper bound %, name, display color), lowest band first
type Band = (f64, &'static str, &'static str);

const MALE_BANDS: [Band; 5] = [
    (6.0, "Essential Fat", "#3b82f6"),
    (13.0, "Athletic", "#10b981"),
    (17.0, "Fitness", "#84cc16"),
    (24.0, "Average", "#f59e0b"),
    (100.0, "Obese", "#ef4444"),
];

const FEMALE_BANDS: [Band; 5] = [
    (14.0, "Essential Fat", "#3b82f6"),
    (20.0, "Athletic", "#10b981"),
    (24.0, "Fitness", "#84cc16"),
    (31.0, "Average", "#f59e0b"),
    (100.0, "Obese", "#ef4444"),
];

/// Chart breakpoints (% body fat) paired with the position band they end
const MALE_BREAKPOINTS: [f64; 5] = [6.0, 13.0, 17.0, 24.0, 50.0];
const FEMALE_BREAKPOINTS: [f64; 5] = [14.0, 20.0, 24.0, 31.0, 50.0];
const POSITION_BANDS: [(f64, f64); 5] = [
    (0.0, 12.0),
    (12.0, 24.0),
    (24.0, 34.0),
    (34.0, 50.0),
    (50.0, 100.0),
];

fn bands(sex: Sex) -> &'static [Band; 5] {
    match sex {
        Sex::Male => &MALE_BANDS,
        Sex::Female => &FEMALE_BANDS,
    }
}

/// First band whose upper bound is >= `percentage`, else the last band
pub fn body_fat_category(sex: Sex, percentage: f64) -> BodyFatCategory {
    let table = bands(sex);
    let &(_, name, color) = table
        .iter()
        .find(|(upper, _, _)| *upper >= percentage)
        .unwrap_or(&table[table.len() - 1]);
    BodyFatCategory { name, color }
}

/// Map a body-fat percentage to a 0-100 marker position on the scale
pub fn chart_position(sex: Sex, percentage: f64) -> f64 {
    let breakpoints = match sex {
        Sex::Male => &MALE_BREAKPOINTS,
        Sex::Female => &FEMALE_BREAKPOINTS,
    };

    if percentage.is_nan() || percentage <= 0.0 {
        return 0.0;
    }

    let mut lower_pct = 0.0;
    for (&upper_pct, &(start, end)) in breakpoints.iter().zip(POSITION_BANDS.iter()) {
        if percentage <= upper_pct {
            let fraction = (percentage - lower_pct) / (upper_pct - lower_pct);
            return (start + fraction * (end - start)).clamp(0.0, 100.0);
        }
        lower_pct = upper_pct;
    }

    100.0
}
