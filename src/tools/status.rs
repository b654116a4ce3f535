//! LeanLog Status Tool
//!
//! Runtime status of the service and usage notes for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::{migrations, Database};

/// How to use the LeanLog tools, for AI assistants
pub const USAGE_INSTRUCTIONS: &str = r#"
# LeanLog Usage

## Looking up foods

1. `search_foods` with a free-text query (e.g. "greek yogurt plain").
   Returns up to 10 results. Every result carries calories, protein, carbs
   and fat **per 100 g** plus a list of `servingOptions` (label + grams),
   sorted by weight.
2. Pick a serving by its exact label, or pass explicit grams.
3. `scale_serving` with the query, the result's `fdcId`, the serving and a
   quantity (servings eaten, may be fractional). Values come back rounded
   to whole kcal / grams.

## Logging

- `log_food` stores one scaled serving for a user on a date
  (YYYY-MM-DD, defaults to today). Pass the per-100 g values from the
  search result; the tool scales them itself.
- `get_day_log` returns a day's entries in logging order plus totals.
- `delete_food_log_entry` removes one entry by id.

## Body composition

- `estimate_body_composition`: U.S. Navy tape method. Needs sex, height,
  weight, waist and neck; women also need hip. Units are inches/pounds
  (imperial, default) or centimeters/kilograms (metric). The estimate is
  clamped to 3-60 % and comes with a category and a 0-100 chart position.
- `calculate_bmi`: BMI, WHO category, and program eligibility
  (BMI >= 30, or >= 27 with a weight-related condition).

Never guess missing measurements; ask the user.
"#;

/// Service status information
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeanlogStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: Option<i32>,
    pub schema_current: bool,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, database: &Database) -> LeanlogStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let (schema_version, schema_current) = database
            .with_conn(|conn| {
                Ok((
                    migrations::get_schema_version(conn)?,
                    migrations::is_current(conn)?,
                ))
            })
            .map(|(version, current)| (Some(version), current))
            .unwrap_or((None, false));

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        LeanlogStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version,
            schema_current,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
