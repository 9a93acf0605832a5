//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and building goals and
//! activities with sensible defaults that satisfy the data model invariants.

use crate::{
    config::goals::{ActivityConfig, ActivityTypeConfig, GoalConfig},
    core::{
        activity::ActivityCatalog,
        goal::{self, NewGoal},
    },
    entities::{GoalPriority, GoalStatus, activity, goal as goal_entity},
    errors::Result,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Target value used by every fixture goal
pub const FIXTURE_TARGET: f64 = 10.0;

/// Creates an in-memory `SQLite` database with the goals table created.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A fixed "now" so timestamps compare exactly across a round trip.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Progress value consistent with the given status
#[must_use]
pub fn progress_for(status: GoalStatus) -> f64 {
    match status {
        GoalStatus::NotStarted => 0.0,
        GoalStatus::InProgress => FIXTURE_TARGET / 2.0,
        GoalStatus::Completed => FIXTURE_TARGET,
        GoalStatus::Failed => 3.0,
    }
}

/// Builds an in-memory goal record without touching the database.
///
/// # Defaults
/// * `target_value`: 10.0, `current_value` from [`progress_for`]
/// * `priority`: medium
/// * window: 2024-03-01 to 2024-05-31
#[must_use]
pub fn goal_fixture(
    reference: &str,
    user_id: &str,
    category: &str,
    status: GoalStatus,
    health_bonus_eligible: bool,
) -> goal_entity::Model {
    goal_entity::Model {
        id: 0,
        reference: reference.to_string(),
        user_id: user_id.to_string(),
        title: format!("Goal {reference}"),
        description: String::new(),
        target_value: FIXTURE_TARGET,
        current_value: progress_for(status),
        unit: "sessions".to_string(),
        start_date: date(2024, 3, 1),
        end_date: date(2024, 5, 31),
        status,
        category: category.to_string(),
        priority: GoalPriority::Medium,
        manager_notes: None,
        health_bonus_eligible,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

/// Builds a valid, not-started [`NewGoal`] in the "Physical Health" category.
#[must_use]
pub fn new_goal_fixture(reference: &str, user_id: &str) -> NewGoal {
    NewGoal {
        reference: reference.to_string(),
        user_id: user_id.to_string(),
        title: "Weekly Gym Sessions".to_string(),
        description: "Attend the gym at least 3 times per week".to_string(),
        target_value: FIXTURE_TARGET,
        current_value: 0.0,
        unit: "sessions".to_string(),
        start_date: date(2024, 3, 1),
        end_date: date(2024, 5, 31),
        status: GoalStatus::NotStarted,
        category: "Physical Health".to_string(),
        priority: GoalPriority::Medium,
        manager_notes: None,
        health_bonus_eligible: true,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

/// Builds a fixture entry as it would be read from goals.toml.
#[must_use]
pub fn goal_config_fixture(
    reference: &str,
    user_id: &str,
    current_value: f64,
    status: Option<GoalStatus>,
) -> GoalConfig {
    GoalConfig {
        reference: reference.to_string(),
        user_id: user_id.to_string(),
        title: "Hydration Goal".to_string(),
        description: "Drink at least 8 glasses of water daily".to_string(),
        target_value: FIXTURE_TARGET,
        current_value,
        unit: "days".to_string(),
        start_date: date(2024, 3, 1),
        end_date: date(2024, 3, 31),
        status,
        category: "Nutrition".to_string(),
        priority: GoalPriority::High,
        manager_notes: None,
        health_bonus_eligible: false,
    }
}

/// Inserts a not-started goal via [`new_goal_fixture`].
pub async fn create_test_goal(
    db: &DatabaseConnection,
    reference: &str,
    user_id: &str,
) -> Result<goal_entity::Model> {
    goal::create_goal(db, new_goal_fixture(reference, user_id)).await
}

fn activity_type(id: &str, points_per_unit: f64, unit: &str, goal_per_day: f64) -> ActivityTypeConfig {
    ActivityTypeConfig {
        id: id.to_string(),
        name: id.to_string(),
        points_per_unit,
        unit: unit.to_string(),
        goal_per_day,
    }
}

/// Catalogue with steps (1), water (10), workout (100), sleep (50) and
/// meditation (20) points per unit.
#[must_use]
pub fn activity_catalog_fixture() -> ActivityCatalog {
    ActivityCatalog::new(vec![
        activity_type("steps", 1.0, "step", 10_000.0),
        activity_type("water", 10.0, "glass", 8.0),
        activity_type("workout", 100.0, "session", 1.0),
        activity_type("sleep", 50.0, "hour", 8.0),
        activity_type("meditation", 20.0, "minute", 15.0),
    ])
}

/// Builds an in-memory activity worth `points`, logged as a single unit.
#[must_use]
pub fn activity_fixture(
    user_id: &str,
    activity_type: &str,
    points: f64,
    logged_at: DateTime<Utc>,
) -> activity::Model {
    activity::Model {
        id: 0,
        user_id: user_id.to_string(),
        activity_type: activity_type.to_string(),
        value: 1.0,
        points,
        logged_at,
    }
}

/// Builds an activity fixture entry logged at [`fixed_now`].
#[must_use]
pub fn activity_config_fixture(user_id: &str, activity_type: &str, value: f64) -> ActivityConfig {
    ActivityConfig {
        user_id: user_id.to_string(),
        activity_type: activity_type.to_string(),
        value,
        logged_at: fixed_now(),
    }
}
