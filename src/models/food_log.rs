//! Food log entry model
//!
//! One logged serving of a food for a user on a day. Stores only the scaled
//! nutrient numbers, never the source record.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::Macros;

/// A logged serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogEntry {
    pub id: i64,
    pub user_id: String,
    pub date: String, // ISO date: "2026-10-19"
    pub fdc_id: Option<i64>,
    pub food_name: String,
    pub serving_label: String,
    pub serving_grams: f64,
    pub quantity: f64,
    pub nutrition: Macros,
    pub created_at: String,
}

/// Data for creating a log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogEntryCreate {
    pub user_id: String,
    pub date: String,
    pub fdc_id: Option<i64>,
    pub food_name: String,
    pub serving_label: String,
    pub serving_grams: f64,
    pub quantity: f64,
    pub nutrition: Macros,
}

impl FoodLogEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            fdc_id: row.get("fdc_id")?,
            food_name: row.get("food_name")?,
            serving_label: row.get("serving_label")?,
            serving_grams: row.get("serving_grams")?,
            quantity: row.get("quantity")?,
            nutrition: Macros {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Insert a new entry
    pub fn create(conn: &Connection, data: &FoodLogEntryCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO food_log_entries (
                user_id, date, fdc_id, food_name, serving_label, serving_grams, quantity,
                calories, protein, carbs, fat
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                data.user_id,
                data.date,
                data.fdc_id,
                data.food_name,
                data.serving_label,
                data.serving_grams,
                data.quantity,
                data.nutrition.calories,
                data.nutrition.protein,
                data.nutrition.carbs,
                data.nutrition.fat,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_log_entries WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Entries for one user and day, in logging order
    pub fn list_for_day(conn: &Connection, user_id: &str, date: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM food_log_entries WHERE user_id = ?1 AND date = ?2 ORDER BY id ASC",
        )?;

        let entries = stmt
            .query_map(params![user_id, date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Delete an entry, returning whether it existed
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM food_log_entries WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn entry(user: &str, date: &str, calories: f64) -> FoodLogEntryCreate {
        FoodLogEntryCreate {
            user_id: user.to_string(),
            date: date.to_string(),
            fdc_id: Some(171688),
            food_name: "Apple".to_string(),
            serving_label: "1 cup".to_string(),
            serving_grams: 240.0,
            quantity: 1.0,
            nutrition: Macros::new(calories, 1.0, 33.0, 0.0),
        }
    }

    #[test]
    fn test_create_and_list_for_day() {
        let conn = conn();
        let first = FoodLogEntry::create(&conn, &entry("u1", "2026-10-19", 125.0)).unwrap();
        FoodLogEntry::create(&conn, &entry("u1", "2026-10-19", 80.0)).unwrap();
        FoodLogEntry::create(&conn, &entry("u1", "2026-10-18", 300.0)).unwrap();
        FoodLogEntry::create(&conn, &entry("u2", "2026-10-19", 500.0)).unwrap();

        assert_eq!(first.nutrition.calories, 125.0);
        assert_eq!(first.fdc_id, Some(171688));

        let day = FoodLogEntry::list_for_day(&conn, "u1", "2026-10-19").unwrap();
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].id, first.id);
        assert_eq!(day[1].nutrition.calories, 80.0);
    }

    #[test]
    fn test_delete() {
        let conn = conn();
        let created = FoodLogEntry::create(&conn, &entry("u1", "2026-10-19", 125.0)).unwrap();
        assert!(FoodLogEntry::delete(&conn, created.id).unwrap());
        assert!(!FoodLogEntry::delete(&conn, created.id).unwrap());
        assert!(FoodLogEntry::get_by_id(&conn, created.id).unwrap().is_none());
    }
}
