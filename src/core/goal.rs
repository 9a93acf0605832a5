//! Goal business logic - ingestion, seeding and progress updates.
//!
//! Every record entering the database passes [`validate_new_goal`], so the rest
//! of the crate can rely on the status/progress invariants holding. Progress
//! updates recompute the status instead of trusting the caller.

use crate::{
    config::goals::GoalConfig,
    entities::{Goal, GoalPriority, GoalStatus, goal},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, warn};

/// A goal ready for insertion, with every field resolved.
///
/// Fields mirror [`goal::Model`] without the row id.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewGoal {
    pub reference: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: GoalStatus,
    pub category: String,
    pub priority: GoalPriority,
    pub manager_notes: Option<String>,
    pub health_bonus_eligible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewGoal {
    /// Resolves a fixture entry into an insertable goal stamped with `now`.
    ///
    /// A missing status is derived from the starting progress.
    #[must_use]
    pub fn from_config(config: &GoalConfig, now: DateTime<Utc>) -> Self {
        let status = config.status.unwrap_or_else(|| {
            GoalStatus::from_progress(config.current_value, config.target_value)
        });

        Self {
            reference: config.reference.trim().to_string(),
            user_id: config.user_id.clone(),
            title: config.title.trim().to_string(),
            description: config.description.clone(),
            target_value: config.target_value,
            current_value: config.current_value,
            unit: config.unit.clone(),
            start_date: config.start_date,
            end_date: config.end_date,
            status,
            category: config.category.clone(),
            priority: config.priority,
            manager_notes: config.manager_notes.clone(),
            health_bonus_eligible: config.health_bonus_eligible,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Checks a goal against the data model invariants.
///
/// # Errors
/// Returns [`Error::InvalidGoal`] naming the first violated invariant.
pub fn validate_new_goal(goal: &NewGoal) -> Result<()> {
    let reject = |reason: &str| -> Result<()> {
        Err(Error::InvalidGoal {
            reference: goal.reference.clone(),
            reason: reason.to_string(),
        })
    };

    if goal.reference.trim().is_empty() {
        return reject("reference cannot be empty");
    }
    if goal.user_id.trim().is_empty() {
        return reject("user id cannot be empty");
    }
    if goal.title.trim().is_empty() {
        return reject("title cannot be empty");
    }
    if !goal.target_value.is_finite() || goal.target_value <= 0.0 {
        return reject("target value must be positive");
    }
    if !goal.current_value.is_finite() || goal.current_value < 0.0 {
        return reject("current value cannot be negative");
    }
    if goal.end_date < goal.start_date {
        return reject("end date is before start date");
    }
    if goal.updated_at < goal.created_at {
        return reject("updated timestamp is before created timestamp");
    }

    let consistent = match goal.status {
        GoalStatus::NotStarted => goal.current_value == 0.0,
        GoalStatus::InProgress => {
            goal.current_value > 0.0 && goal.current_value < goal.target_value
        }
        GoalStatus::Completed => goal.current_value >= goal.target_value,
        GoalStatus::Failed => goal.current_value > 0.0,
    };
    if !consistent {
        return Err(Error::InvalidGoal {
            reference: goal.reference.clone(),
            reason: format!(
                "status {} does not match progress {}/{}",
                goal.status, goal.current_value, goal.target_value
            ),
        });
    }

    Ok(())
}

/// Retrieves every goal in insertion order.
pub async fn get_all_goals<C>(db: &C) -> Result<Vec<goal::Model>>
where
    C: ConnectionTrait,
{
    Goal::find()
        .order_by_asc(goal::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a goal by its external reference.
pub async fn get_goal_by_reference<C>(db: &C, reference: &str) -> Result<Option<goal::Model>>
where
    C: ConnectionTrait,
{
    Goal::find()
        .filter(goal::Column::Reference.eq(reference))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Validates and inserts a new goal.
pub async fn create_goal<C>(db: &C, new_goal: NewGoal) -> Result<goal::Model>
where
    C: ConnectionTrait,
{
    validate_new_goal(&new_goal)?;

    let active = goal::ActiveModel {
        reference: Set(new_goal.reference),
        user_id: Set(new_goal.user_id),
        title: Set(new_goal.title),
        description: Set(new_goal.description),
        target_value: Set(new_goal.target_value),
        current_value: Set(new_goal.current_value),
        unit: Set(new_goal.unit),
        start_date: Set(new_goal.start_date),
        end_date: Set(new_goal.end_date),
        status: Set(new_goal.status),
        category: Set(new_goal.category),
        priority: Set(new_goal.priority),
        manager_notes: Set(new_goal.manager_notes),
        health_bonus_eligible: Set(new_goal.health_bonus_eligible),
        created_at: Set(new_goal.created_at),
        updated_at: Set(new_goal.updated_at),
        ..Default::default()
    };

    let inserted = active.insert(db).await?;
    debug!(
        "Created goal '{}' for user {} ({})",
        inserted.reference, inserted.user_id, inserted.status
    );
    Ok(inserted)
}

/// Seeds goals from the fixture file inside a single transaction.
///
/// Goals whose reference already exists are skipped. Any invalid fixture entry
/// aborts the whole seed.
///
/// # Returns
/// The number of goals inserted
pub async fn seed_goals(
    db: &DatabaseConnection,
    configs: &[GoalConfig],
    now: DateTime<Utc>,
) -> Result<usize> {
    info!(
        "Starting to seed goals. Found {} goal fixtures.",
        configs.len()
    );

    let txn = db.begin().await?;
    let mut inserted = 0;

    for config in configs {
        if get_goal_by_reference(&txn, config.reference.trim())
            .await?
            .is_some()
        {
            warn!(
                "Goal '{}' already exists. Skipping.",
                config.reference.trim()
            );
            continue;
        }

        create_goal(&txn, NewGoal::from_config(config, now)).await?;
        inserted += 1;
    }

    txn.commit().await?;
    info!("Finished seeding goals: {} inserted.", inserted);
    Ok(inserted)
}

/// Records new progress for a goal and recomputes its status.
///
/// `updated_at` never moves before `created_at`, even if `now` lags behind it.
///
/// # Errors
/// * [`Error::InvalidProgress`] for negative or non-finite values
/// * [`Error::GoalNotFound`] for unknown references
/// * [`Error::GoalClosed`] if the goal has been marked failed
pub async fn record_progress<C>(
    db: &C,
    reference: &str,
    current_value: f64,
    now: DateTime<Utc>,
) -> Result<goal::Model>
where
    C: ConnectionTrait,
{
    if !current_value.is_finite() || current_value < 0.0 {
        return Err(Error::InvalidProgress {
            value: current_value,
        });
    }

    let existing = get_goal_by_reference(db, reference)
        .await?
        .ok_or_else(|| Error::GoalNotFound {
            reference: reference.to_string(),
        })?;

    if existing.status == GoalStatus::Failed {
        return Err(Error::GoalClosed {
            reference: reference.to_string(),
        });
    }

    let status = GoalStatus::from_progress(current_value, existing.target_value);
    let updated_at = now.max(existing.created_at);
    let previous = existing.status;

    let mut active: goal::ActiveModel = existing.into();
    active.current_value = Set(current_value);
    active.status = Set(status);
    active.updated_at = Set(updated_at);

    let updated = active.update(db).await?;
    info!(
        "Recorded progress {} on goal '{}' ({} -> {})",
        current_value, reference, previous, status
    );
    Ok(updated)
}

/// Closes a goal as failed. Calling it on an already failed goal is a no-op.
///
/// Only goals with recorded progress can fail; a goal with no progress stays
/// not-started.
///
/// # Errors
/// * [`Error::GoalNotFound`] for unknown references
/// * [`Error::InvalidGoal`] if the goal has no progress
pub async fn mark_goal_failed<C>(
    db: &C,
    reference: &str,
    now: DateTime<Utc>,
) -> Result<goal::Model>
where
    C: ConnectionTrait,
{
    let existing = get_goal_by_reference(db, reference)
        .await?
        .ok_or_else(|| Error::GoalNotFound {
            reference: reference.to_string(),
        })?;

    if existing.status == GoalStatus::Failed {
        return Ok(existing);
    }
    if existing.current_value <= 0.0 {
        return Err(Error::InvalidGoal {
            reference: reference.to_string(),
            reason: "a goal without progress cannot be marked failed".to_string(),
        });
    }

    let updated_at = now.max(existing.created_at);
    let mut active: goal::ActiveModel = existing.into();
    active.status = Set(GoalStatus::Failed);
    active.updated_at = Set(updated_at);

    let updated = active.update(db).await?;
    info!("Marked goal '{}' as failed", reference);
    Ok(updated)
}
