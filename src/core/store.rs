//! In-memory goal store.
//!
//! The store is built once from the database and handed to consumers by
//! reference. All queries are read-only, preserve insertion order, and return
//! an empty list rather than an error for unknown users.

use crate::{
    core::goal::get_all_goals,
    entities::{GoalStatus, goal},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::info;

/// The authoritative set of goals for a session
#[derive(Debug, Clone, Default)]
pub struct GoalStore {
    goals: Vec<goal::Model>,
}

impl GoalStore {
    /// Wraps an already validated list of goals, keeping its order.
    #[must_use]
    pub const fn new(goals: Vec<goal::Model>) -> Self {
        Self { goals }
    }

    /// Loads every goal from the database in insertion order.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let goals = get_all_goals(db).await?;
        info!("Loaded {} goals into the goal store.", goals.len());
        Ok(Self::new(goals))
    }

    /// All goals in insertion order
    #[must_use]
    pub fn all(&self) -> &[goal::Model] {
        &self.goals
    }

    /// Number of goals held
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the store holds no goals
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Goals owned by `user_id`, in insertion order.
    #[must_use]
    pub fn goals_for_user(&self, user_id: &str) -> Vec<&goal::Model> {
        self.goals
            .iter()
            .filter(|goal| goal.user_id == user_id)
            .collect()
    }

    /// Goals owned by `user_id` whose category matches exactly (case-sensitive).
    ///
    /// `None` applies no category filter.
    #[must_use]
    pub fn goals_for_user_and_category(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> Vec<&goal::Model> {
        self.goals
            .iter()
            .filter(|goal| goal.user_id == user_id)
            .filter(|goal| category.is_none_or(|category| goal.category == category))
            .collect()
    }

    /// Open goals (neither completed nor failed) for a user, soonest deadline first.
    #[must_use]
    pub fn upcoming_goals(&self, user_id: &str, limit: usize) -> Vec<&goal::Model> {
        let mut open: Vec<&goal::Model> = self
            .goals_for_user(user_id)
            .into_iter()
            .filter(|goal| !matches!(goal.status, GoalStatus::Completed | GoalStatus::Failed))
            .collect();
        sort_goals(&mut open, GoalSort::EndDate);
        open.truncate(limit);
        open
    }

    /// Distinct owners in order of first appearance
    #[must_use]
    pub fn user_ids(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for goal in &self.goals {
            if !seen.contains(&goal.user_id.as_str()) {
                seen.push(&goal.user_id);
            }
        }
        seen
    }
}

/// Orderings offered by goal lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GoalSort {
    /// Earliest end date first
    #[default]
    EndDate,
    /// High, then medium, then low
    Priority,
    /// Not started, in progress, completed, failed
    Status,
}

/// Sorts goals in place. The sort is stable, so ties keep insertion order.
pub fn sort_goals(goals: &mut [&goal::Model], sort: GoalSort) {
    match sort {
        GoalSort::EndDate => goals.sort_by_key(|goal| goal.end_date),
        GoalSort::Priority => goals.sort_by_key(|goal| goal.priority.sort_rank()),
        GoalSort::Status => goals.sort_by_key(|goal| goal.status.sort_rank()),
    }
}

/// Case-insensitive substring search over title and description.
///
/// A blank term matches everything.
#[must_use]
pub fn search_goals<'a>(goals: &[&'a goal::Model], term: &str) -> Vec<&'a goal::Model> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return goals.to_vec();
    }

    goals
        .iter()
        .copied()
        .filter(|goal| {
            goal.title.to_lowercase().contains(&needle)
                || goal.description.to_lowercase().contains(&needle)
        })
        .collect()
}
