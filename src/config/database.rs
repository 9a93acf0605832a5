//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definition with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust model.

use crate::entities::{Activity, Goal};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Gets the database URL from the `DATABASE_URL` environment variable.
///
/// Falls back to an in-memory `SQLite` database, which is reseeded from the
/// fixture file on every start.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    tracing::debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the goals and activities tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut goal_table = schema.create_table_from_entity(Goal);
    goal_table.if_not_exists();

    db.execute(builder.build(&goal_table)).await?;

    let mut activity_table = schema.create_table_from_entity(Activity);
    activity_table.if_not_exists();

    db.execute(builder.build(&activity_table)).await?;

    Ok(())
}
