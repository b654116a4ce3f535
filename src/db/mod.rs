//! Database module
//!
//! SQLite storage for the food log: pooling and migrations.

pub mod connection;
pub mod migrations;

use std::path::Path;

use tracing::info;

pub use connection::{Database, DbError, DbResult};

/// Open (creating if needed) the database at `path` and bring the schema up
/// to date
pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Database> {
    let database = Database::new(path)?;
    migrate(&database)?;
    Ok(database)
}

/// Migrated in-memory database
pub fn open_in_memory() -> DbResult<Database> {
    let database = Database::in_memory()?;
    migrate(&database)?;
    Ok(database)
}

fn migrate(database: &Database) -> DbResult<()> {
    database.with_conn(|conn| {
        migrations::run_migrations(conn)?;
        let version = migrations::get_schema_version(conn)?;
        info!("Database schema version: {}", version);
        Ok(())
    })
}
