//! Goal entity - Represents one trackable wellness objective assigned to a user.
//!
//! Each goal carries a numeric target and current value, a status derived from
//! that progress, a category, a priority, and a `health_bonus_eligible` flag.
//! The integer `id` is auto-incremented and therefore records insertion order;
//! `reference` is the stable external identifier used everywhere else.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a goal
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    /// No progress recorded yet (`current_value == 0`)
    #[sea_orm(string_value = "not-started")]
    NotStarted,
    /// Some progress, target not reached
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    /// Target reached or exceeded
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Closed without reaching the target
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl GoalStatus {
    /// Derives the status implied by a progress value.
    ///
    /// `Failed` is never derived; it is only set explicitly.
    #[must_use]
    pub fn from_progress(current_value: f64, target_value: f64) -> Self {
        if current_value <= 0.0 {
            Self::NotStarted
        } else if current_value >= target_value {
            Self::Completed
        } else {
            Self::InProgress
        }
    }

    /// Position used when sorting goals by status
    #[must_use]
    pub const fn sort_rank(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
            Self::Failed => 3,
        }
    }

    /// Wire name, e.g. `"in-progress"`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority assigned to a goal
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    /// Low priority
    #[sea_orm(string_value = "low")]
    Low,
    /// Medium priority
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    /// High priority
    #[sea_orm(string_value = "high")]
    High,
}

impl GoalPriority {
    /// Position used when sorting goals by priority (high first)
    #[must_use]
    pub const fn sort_rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Goal database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    /// Auto-incremented row id; ascending order is insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Stable external identifier (e.g. `goal100-1-physical-health`)
    #[sea_orm(unique)]
    pub reference: String,
    /// Owning user
    pub user_id: String,
    /// Short title shown in goal lists
    pub title: String,
    /// Longer description
    pub description: String,
    /// Value at which the goal counts as completed (always positive)
    pub target_value: f64,
    /// Progress so far (never negative, may exceed the target)
    pub current_value: f64,
    /// Unit label for the values (e.g. "sessions", "days")
    pub unit: String,
    /// First day of the goal window
    pub start_date: Date,
    /// Last day of the goal window
    pub end_date: Date,
    /// Lifecycle status, consistent with `current_value`
    pub status: GoalStatus,
    /// Free-form category, conventionally "Physical Health", "Mental Health" or "Nutrition"
    pub category: String,
    /// Priority
    pub priority: GoalPriority,
    /// Optional note left by the user's manager
    pub manager_notes: Option<String>,
    /// Whether completing this goal counts towards the health bonus
    pub health_bonus_eligible: bool,
    /// When the goal was created
    pub created_at: DateTimeUtc,
    /// When the goal was last modified
    pub updated_at: DateTimeUtc,
}

/// Goals have no relations to other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
