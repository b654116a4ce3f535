//! Food Log Tools
//!
//! Log scaled servings against a user and day, read a day back with totals.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::models::{FoodLogEntry, FoodLogEntryCreate, Macros, ServingOption};
use crate::nutrition::scale_per_100g;

/// Request for log_food
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFoodRequest {
    pub user_id: String,
    /// YYYY-MM-DD, defaults to today
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub fdc_id: Option<i64>,
    pub food_name: String,
    /// Nutrients per 100 g of the food
    pub per_100g: Macros,
    pub serving: ServingOption,
    pub quantity: f64,
}

/// A day of logged food
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    pub user_id: String,
    pub date: String,
    pub entries: Vec<FoodLogEntry>,
    pub totals: Macros,
}

/// Response for delete_food_log_entry
#[derive(Debug, Serialize)]
pub struct DeleteFoodLogEntryResponse {
    pub success: bool,
    pub id: i64,
}

/// Trim and require a user id
pub fn validate_user_id(user_id: &str) -> Result<&str, String> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err("user_id cannot be empty".to_string());
    }
    Ok(user_id)
}

/// Normalize a YYYY-MM-DD date
pub fn validate_date(date: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", date))
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Validate a request and compute the entry to store
pub fn build_entry(request: &LogFoodRequest) -> Result<FoodLogEntryCreate, String> {
    let user_id = validate_user_id(&request.user_id)?;
    let date = match request.date.as_deref() {
        Some(date) => validate_date(date)?,
        None => today(),
    };

    if !(request.quantity.is_finite() && request.quantity >= 0.0) {
        return Err("quantity must be a non-negative number".to_string());
    }
    if !(request.serving.grams.is_finite() && request.serving.grams > 0.0) {
        return Err("serving grams must be greater than 0".to_string());
    }
    if request.food_name.trim().is_empty() {
        return Err("food_name cannot be empty".to_string());
    }

    Ok(FoodLogEntryCreate {
        user_id: user_id.to_string(),
        date,
        fdc_id: request.fdc_id,
        food_name: request.food_name.trim().to_string(),
        serving_label: request.serving.label.clone(),
        serving_grams: request.serving.grams,
        quantity: request.quantity,
        nutrition: scale_per_100g(request.per_100g, &request.serving, request.quantity).round(),
    })
}

/// Store an entry built by [`build_entry`]
pub fn store_entry(db: &Database, data: &FoodLogEntryCreate) -> Result<FoodLogEntry, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    FoodLogEntry::create(&conn, data).map_err(|e| format!("Failed to log food: {}", e))
}

/// Entries for a user and day, with totals
pub fn get_day_log(db: &Database, user_id: &str, date: &str) -> Result<DayLog, String> {
    let user_id = validate_user_id(user_id)?;
    let date = validate_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entries = FoodLogEntry::list_for_day(&conn, user_id, &date)
        .map_err(|e| format!("Failed to load food log: {}", e))?;
    let totals = entries.iter().map(|e| e.nutrition).sum();

    Ok(DayLog {
        user_id: user_id.to_string(),
        date,
        entries,
        totals,
    })
}

/// Delete a log entry
pub fn delete_food_log_entry(db: &Database, id: i64) -> Result<DeleteFoodLogEntryResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let success = FoodLogEntry::delete(&conn, id)
        .map_err(|e| format!("Failed to delete entry: {}", e))?;

    Ok(DeleteFoodLogEntryResponse { success, id })
}
