//! Activity logging, points accrual and the points leaderboard.
//!
//! Logging an activity earns `value * points_per_unit` points for its type.
//! Points are stored on the activity record; totals and the leaderboard are
//! derived from the logged activities on demand.

use crate::{
    config::goals::{ActivityConfig, ActivityTypeConfig, UserConfig},
    entities::{Activity, activity},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// The configured activity types, looked up by id
#[derive(Debug, Clone, Default)]
pub struct ActivityCatalog {
    types: Vec<ActivityTypeConfig>,
}

impl ActivityCatalog {
    /// Builds a catalogue from the `[[activity_types]]` fixture table
    #[must_use]
    pub const fn new(types: Vec<ActivityTypeConfig>) -> Self {
        Self { types }
    }

    /// All activity types in configuration order
    #[must_use]
    pub fn types(&self) -> &[ActivityTypeConfig] {
        &self.types
    }

    /// Finds an activity type by id.
    ///
    /// # Errors
    /// Returns [`Error::UnknownActivityType`] if no type has that id.
    pub fn get(&self, id: &str) -> Result<&ActivityTypeConfig> {
        self.types
            .iter()
            .find(|activity_type| activity_type.id == id)
            .ok_or_else(|| Error::UnknownActivityType { id: id.to_string() })
    }
}

/// Points earned for logging `value` units of an activity.
///
/// # Errors
/// Returns [`Error::InvalidActivityValue`] unless `value` is a positive number.
pub fn points_earned(activity_type: &ActivityTypeConfig, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidActivityValue { value });
    }
    Ok(value * activity_type.points_per_unit)
}

/// Logs an activity for a user and stores the points it earned.
pub async fn log_activity<C>(
    db: &C,
    catalog: &ActivityCatalog,
    user_id: &str,
    activity_type: &str,
    value: f64,
    logged_at: DateTime<Utc>,
) -> Result<activity::Model>
where
    C: ConnectionTrait,
{
    let kind = catalog.get(activity_type)?;
    let points = points_earned(kind, value)?;

    let active = activity::ActiveModel {
        user_id: Set(user_id.to_string()),
        activity_type: Set(kind.id.clone()),
        value: Set(value),
        points: Set(points),
        logged_at: Set(logged_at),
        ..Default::default()
    };

    let inserted = active.insert(db).await?;
    debug!(
        "User {} logged {} {} and earned {} points",
        user_id, value, kind.unit, points
    );
    Ok(inserted)
}

/// Retrieves every logged activity in logging order.
pub async fn get_all_activities<C>(db: &C) -> Result<Vec<activity::Model>>
where
    C: ConnectionTrait,
{
    Activity::find()
        .order_by_asc(activity::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one user's activities in logging order.
pub async fn get_user_activities<C>(db: &C, user_id: &str) -> Result<Vec<activity::Model>>
where
    C: ConnectionTrait,
{
    Activity::find()
        .filter(activity::Column::UserId.eq(user_id))
        .order_by_asc(activity::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Seeds fixture activities inside a single transaction.
///
/// Activities carry no external identifier, so seeding only runs against an
/// empty activities table. Any invalid entry aborts the whole seed.
///
/// # Returns
/// The number of activities inserted
pub async fn seed_activities(
    db: &DatabaseConnection,
    catalog: &ActivityCatalog,
    configs: &[ActivityConfig],
) -> Result<usize> {
    let txn = db.begin().await?;

    let existing = Activity::find().count(&txn).await?;
    if existing > 0 {
        info!(
            "Activities table already holds {} records. Skipping activity seeding.",
            existing
        );
        return Ok(0);
    }

    for config in configs {
        log_activity(
            &txn,
            catalog,
            &config.user_id,
            &config.activity_type,
            config.value,
            config.logged_at,
        )
        .await?;
    }

    txn.commit().await?;
    info!("Finished seeding activities: {} inserted.", configs.len());
    Ok(configs.len())
}

/// Points and activity totals for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProgress {
    /// User the totals belong to
    pub user_id: String,
    /// Sum of points over all the user's activities
    pub total_points: f64,
    /// Number of activities logged
    pub total_activities: usize,
    /// Activities logged on `today`
    pub completed_today: usize,
}

/// Totals one user's activities. Activities of other users are ignored.
pub fn user_progress<'a, I>(activities: I, user_id: &str, today: NaiveDate) -> UserProgress
where
    I: IntoIterator<Item = &'a activity::Model>,
{
    activities
        .into_iter()
        .filter(|activity| activity.user_id == user_id)
        .fold(
            UserProgress {
                user_id: user_id.to_string(),
                total_points: 0.0,
                total_activities: 0,
                completed_today: 0,
            },
            |mut progress, activity| {
                progress.total_points += activity.points;
                progress.total_activities += 1;
                if activity.logged_at.date_naive() == today {
                    progress.completed_today += 1;
                }
                progress
            },
        )
}

/// One row of the points leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// Ranked user
    pub user_id: String,
    /// Display name, or the user id for users missing from the directory
    pub name: String,
    /// Department, if configured
    pub department: Option<String>,
    /// Total points earned
    pub points: f64,
    /// 1-based position; users with equal points keep directory order
    pub rank: usize,
}

/// Ranks users by total points, highest first.
///
/// Every configured user appears, with 0 points if they logged nothing. Users
/// who logged activities but are not configured follow in first-seen order
/// before ranking.
pub fn leaderboard<'a, I>(activities: I, users: &[UserConfig]) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = &'a activity::Model>,
{
    let mut order: Vec<&str> = Vec::with_capacity(users.len());
    let mut totals: HashMap<&str, f64> = HashMap::with_capacity(users.len());
    for user in users {
        if totals.insert(user.id.as_str(), 0.0).is_none() {
            order.push(user.id.as_str());
        }
    }
    for activity in activities {
        let user_id = activity.user_id.as_str();
        let total = totals.entry(user_id).or_insert_with(|| {
            order.push(user_id);
            0.0
        });
        *total += activity.points;
    }

    let mut entries: Vec<LeaderboardEntry> = order
        .into_iter()
        .map(|user_id| {
            let user = users.iter().find(|user| user.id == user_id);
            LeaderboardEntry {
                user_id: user_id.to_string(),
                name: user.map_or_else(|| user_id.to_string(), |user| user.name.clone()),
                department: user.and_then(|user| user.department.clone()),
                points: totals.get(user_id).copied().unwrap_or_default(),
                rank: 0,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.points.total_cmp(&a.points));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    debug!("Ranked {} users on the leaderboard", entries.len());
    entries
}
