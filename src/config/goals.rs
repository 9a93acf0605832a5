//! Goal fixture loading from goals.toml
//!
//! The fixture file describes the users, the manager/report structure, the
//! activity type catalogue, and the goals and activities used to seed the
//! database on start. Goals already present in the database (matched by
//! `reference`) are left untouched by seeding.

use crate::entities::{GoalPriority, GoalStatus};
use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "goals.toml";

/// Configuration structure representing the entire goals.toml file
#[derive(Debug, Default, Deserialize)]
pub struct FixtureConfig {
    /// Known users
    #[serde(default)]
    pub users: Vec<UserConfig>,
    /// Manager to direct-report mapping
    #[serde(default)]
    pub teams: Vec<TeamConfig>,
    /// Goals to seed
    #[serde(default)]
    pub goals: Vec<GoalConfig>,
    /// Loggable activity types and their point values
    #[serde(default)]
    pub activity_types: Vec<ActivityTypeConfig>,
    /// Activities to seed
    #[serde(default)]
    pub activities: Vec<ActivityConfig>,
}

/// A user known to the dashboard
#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    /// User identifier referenced by goals and teams
    pub id: String,
    /// Display name
    pub name: String,
    /// Department the user belongs to
    #[serde(default)]
    pub department: Option<String>,
}

/// One manager and their direct reports
#[derive(Debug, Deserialize, Clone)]
pub struct TeamConfig {
    /// Manager user id
    pub manager: String,
    /// User ids reporting directly to the manager
    #[serde(default)]
    pub reports: Vec<String>,
}

/// Seed data for a single goal
#[derive(Debug, Deserialize, Clone)]
pub struct GoalConfig {
    /// Stable external identifier, unique across all goals
    pub reference: String,
    /// Owning user
    pub user_id: String,
    /// Goal title
    pub title: String,
    /// Goal description
    #[serde(default)]
    pub description: String,
    /// Positive target value
    pub target_value: f64,
    /// Starting progress, defaults to 0
    #[serde(default)]
    pub current_value: f64,
    /// Unit label
    pub unit: String,
    /// First day of the goal window (`"YYYY-MM-DD"`)
    pub start_date: NaiveDate,
    /// Last day of the goal window (`"YYYY-MM-DD"`)
    pub end_date: NaiveDate,
    /// Derived from `current_value` when omitted
    #[serde(default)]
    pub status: Option<GoalStatus>,
    /// Category label
    pub category: String,
    /// Defaults to medium
    #[serde(default)]
    pub priority: GoalPriority,
    /// Optional manager note
    #[serde(default)]
    pub manager_notes: Option<String>,
    /// Whether the goal counts towards the health bonus
    #[serde(default)]
    pub health_bonus_eligible: bool,
}

/// A kind of activity users can log, e.g. steps or water
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ActivityTypeConfig {
    /// Identifier stored on logged activities
    pub id: String,
    /// Display name
    pub name: String,
    /// Points earned per unit logged
    pub points_per_unit: f64,
    /// Unit label, singular
    pub unit: String,
    /// Suggested daily amount
    #[serde(default)]
    pub goal_per_day: f64,
}

/// Seed data for a single logged activity.
///
/// Points are not configured; they are computed from the activity type.
#[derive(Debug, Deserialize, Clone)]
pub struct ActivityConfig {
    /// User who logged the activity
    pub user_id: String,
    /// Id of a configured activity type
    pub activity_type: String,
    /// Amount logged
    pub value: f64,
    /// RFC 3339 timestamp, quoted (`"2024-03-14T08:00:00Z"`)
    pub logged_at: DateTime<Utc>,
}

/// Loads the fixture configuration from a TOML file
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FixtureConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading goal fixtures from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses fixture configuration from TOML text
pub fn parse_config(contents: &str) -> Result<FixtureConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse goals.toml: {e}"),
    })
}

/// Path of the fixture file: `GOALS_CONFIG` if set, otherwise `./goals.toml`
#[must_use]
pub fn config_path() -> String {
    std::env::var("GOALS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Loads the fixture configuration from [`config_path`]
pub fn load_default_config() -> Result<FixtureConfig> {
    load_config(config_path())
}
