//! Goal aggregation - completion rates, health bonus eligibility and category
//! breakdowns.
//!
//! Every function here is pure and total: empty inputs yield 0 rather than an
//! error, and results are percentages in `[0, 100]`. Only fully completed goals
//! count; in-progress goals earn no partial credit.

use crate::{
    core::store::GoalStore,
    entities::{GoalStatus, goal},
};
use serde::Serialize;

/// Eligibility at or above this percentage is on track for the health bonus
pub const BONUS_ON_TRACK_THRESHOLD: f64 = 75.0;

/// The fixed categories reported in a category breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GoalCategory {
    /// "Physical Health"
    PhysicalHealth,
    /// "Mental Health"
    MentalHealth,
    /// "Nutrition"
    Nutrition,
}

impl GoalCategory {
    /// All categories in display order
    pub const ALL: [Self; 3] = [Self::PhysicalHealth, Self::MentalHealth, Self::Nutrition];

    /// Label as stored on goals
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhysicalHealth => "Physical Health",
            Self::MentalHealth => "Mental Health",
            Self::Nutrition => "Nutrition",
        }
    }

    /// Exact, case-sensitive match against a stored label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == label)
    }
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Goals with status completed
    pub completed: usize,
    /// Goals with status in-progress
    pub in_progress: usize,
    /// Goals with status not-started
    pub not_started: usize,
    /// Goals with status failed
    pub failed: usize,
    /// All goals counted
    pub total: usize,
}

impl StatusCounts {
    /// Counts goals by status in one pass.
    pub fn tally<'a, I>(goals: I) -> Self
    where
        I: IntoIterator<Item = &'a goal::Model>,
    {
        goals.into_iter().fold(Self::default(), |mut counts, goal| {
            match goal.status {
                GoalStatus::Completed => counts.completed += 1,
                GoalStatus::InProgress => counts.in_progress += 1,
                GoalStatus::NotStarted => counts.not_started += 1,
                GoalStatus::Failed => counts.failed += 1,
            }
            counts.total += 1;
            counts
        })
    }

    /// Completed share of the total, 0 when there are no goals
    #[must_use]
    pub fn completion_rate(&self) -> f64 {
        percentage(self.completed, self.total)
    }
}

/// `100 * part / whole`, defined as 0 when `whole` is 0
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    // Goal counts are far below 2^52, so the conversion is exact
    #[allow(clippy::cast_precision_loss)]
    let ratio = part as f64 / whole as f64;
    ratio * 100.0
}

/// Percentage of goals with status completed.
///
/// `0` for an empty list. In-progress goals do not contribute.
pub fn completion_rate<'a, I>(goals: I) -> f64
where
    I: IntoIterator<Item = &'a goal::Model>,
{
    StatusCounts::tally(goals).completion_rate()
}

/// Percentage of bonus-eligible goals that are completed.
///
/// Only goals flagged `health_bonus_eligible` are considered; `0` when there
/// are none.
pub fn health_bonus_eligibility<'a, I>(goals: I) -> f64
where
    I: IntoIterator<Item = &'a goal::Model>,
{
    let counts = StatusCounts::tally(
        goals
            .into_iter()
            .filter(|goal| goal.health_bonus_eligible),
    );
    counts.completion_rate()
}

/// Progress of a single goal as `100 * current / target`.
///
/// Not capped, so over-achieved goals report more than 100.
#[must_use]
pub fn goal_progress_percent(goal: &goal::Model) -> f64 {
    if goal.target_value <= 0.0 {
        return 0.0;
    }
    goal.current_value / goal.target_value * 100.0
}

/// Statistics for one category of a user's goals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    /// Category these numbers describe
    pub category: GoalCategory,
    /// Completed goals in the category
    pub completed: usize,
    /// In-progress goals in the category
    pub in_progress: usize,
    /// All goals in the category
    pub total: usize,
    /// Completion rate restricted to the category
    pub completion_rate: f64,
}

/// Breaks goals down over the three fixed categories.
///
/// Goals with any other category label are left out of every bucket.
#[must_use]
pub fn category_breakdown_of(goals: &[&goal::Model]) -> Vec<CategoryStats> {
    GoalCategory::ALL
        .into_iter()
        .map(|category| {
            let counts = StatusCounts::tally(
                goals
                    .iter()
                    .copied()
                    .filter(|goal| goal.category == category.as_str()),
            );
            CategoryStats {
                category,
                completed: counts.completed,
                in_progress: counts.in_progress,
                total: counts.total,
                completion_rate: counts.completion_rate(),
            }
        })
        .collect()
}

/// Category breakdown of a user's goals
#[must_use]
pub fn category_breakdown(store: &GoalStore, user_id: &str) -> Vec<CategoryStats> {
    category_breakdown_of(&store.goals_for_user(user_id))
}

/// Whether a user is on track for the health bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BonusStanding {
    /// Eligibility at or above [`BONUS_ON_TRACK_THRESHOLD`]
    OnTrack,
    /// Below the threshold
    NeedsAttention,
}

impl BonusStanding {
    /// Classifies an eligibility percentage
    #[must_use]
    pub fn from_eligibility(eligibility: f64) -> Self {
        if eligibility >= BONUS_ON_TRACK_THRESHOLD {
            Self::OnTrack
        } else {
            Self::NeedsAttention
        }
    }
}

/// Coarse performance impact derived from the completion rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceImpact {
    /// 70% and above
    High,
    /// 40% up to 70%
    Medium,
    /// Below 40%
    Low,
}

impl PerformanceImpact {
    /// Classifies a completion rate
    #[must_use]
    pub fn from_completion_rate(rate: f64) -> Self {
        if rate >= 70.0 {
            Self::High
        } else if rate >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Derived per-user summary; recomputed on demand and never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    /// User the statistics belong to
    pub user_id: String,
    /// Goal counts by status
    pub counts: StatusCounts,
    /// See [`completion_rate`]
    pub completion_rate: f64,
    /// See [`health_bonus_eligibility`]
    pub health_bonus_eligibility: f64,
    /// One entry per [`GoalCategory`], in display order
    pub categories: Vec<CategoryStats>,
}

impl AggregateStats {
    /// Health bonus standing for this user
    #[must_use]
    pub fn bonus_standing(&self) -> BonusStanding {
        BonusStanding::from_eligibility(self.health_bonus_eligibility)
    }

    /// Performance impact for this user
    #[must_use]
    pub fn performance_impact(&self) -> PerformanceImpact {
        PerformanceImpact::from_completion_rate(self.completion_rate)
    }
}

/// Computes the full summary for one user.
#[must_use]
pub fn aggregate_stats(store: &GoalStore, user_id: &str) -> AggregateStats {
    let goals = store.goals_for_user(user_id);
    let counts = StatusCounts::tally(goals.iter().copied());

    AggregateStats {
        user_id: user_id.to_string(),
        counts,
        completion_rate: counts.completion_rate(),
        health_bonus_eligibility: health_bonus_eligibility(goals.iter().copied()),
        categories: category_breakdown_of(&goals),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 0.01
    }

    fn goal(status: GoalStatus, eligible: bool) -> goal::Model {
        goal_fixture("g", "1", "Physical Health", status, eligible)
    }

    #[test]
    fn test_completion_rate_empty_is_zero() {
        let goals: Vec<goal::Model> = Vec::new();
        assert_eq!(completion_rate(&goals), 0.0);
        assert_eq!(health_bonus_eligibility(&goals), 0.0);
    }

    #[test]
    fn test_mixed_goals_scenario() {
        let goals = vec![
            goal(GoalStatus::Completed, true),
            goal(GoalStatus::InProgress, true),
            goal(GoalStatus::Completed, false),
        ];
        assert!(approx(completion_rate(&goals), 66.67));
        assert_eq!(health_bonus_eligibility(&goals), 50.0);
    }

    #[test]
    fn test_no_completed_goals_means_zero_completion() {
        let goals = vec![
            goal(GoalStatus::InProgress, true),
            goal(GoalStatus::InProgress, true),
            goal(GoalStatus::NotStarted, false),
            goal(GoalStatus::Failed, true),
        ];
        assert_eq!(completion_rate(&goals), 0.0);
        assert_eq!(health_bonus_eligibility(&goals), 0.0);
    }

    #[test]
    fn test_all_completed_and_eligible_is_full_eligibility() {
        let goals = vec![goal(GoalStatus::Completed, true), goal(GoalStatus::Completed, true)];
        assert_eq!(health_bonus_eligibility(&goals), 100.0);
        assert_eq!(completion_rate(&goals), 100.0);
    }

    #[test]
    fn test_eligibility_zero_without_eligible_goals() {
        let goals = vec![goal(GoalStatus::Completed, false), goal(GoalStatus::Completed, false)];
        assert_eq!(health_bonus_eligibility(&goals), 0.0);
    }

    #[test]
    fn test_completion_rate_ignores_order() {
        let mut goals = vec![
            goal(GoalStatus::Completed, true),
            goal(GoalStatus::NotStarted, true),
            goal(GoalStatus::InProgress, false),
            goal(GoalStatus::Completed, false),
            goal(GoalStatus::Failed, true),
        ];
        let forward = completion_rate(&goals);
        goals.reverse();
        assert_eq!(completion_rate(&goals), forward);
        goals.rotate_left(2);
        assert_eq!(completion_rate(&goals), forward);
        assert_eq!(forward, 40.0);
    }

    #[test]
    fn test_rates_stay_within_bounds() {
        let statuses = [
            GoalStatus::NotStarted,
            GoalStatus::InProgress,
            GoalStatus::Completed,
            GoalStatus::Failed,
        ];
        let mut goals = Vec::new();
        for (i, status) in statuses.iter().cycle().take(11).enumerate() {
            goals.push(goal(*status, i % 3 != 0));
            let completion = completion_rate(&goals);
            let eligibility = health_bonus_eligibility(&goals);
            assert!((0.0..=100.0).contains(&completion));
            assert!((0.0..=100.0).contains(&eligibility));
        }
    }

    #[test]
    fn test_goal_progress_percent_is_uncapped() {
        let mut g = goal(GoalStatus::InProgress, true);
        assert_eq!(goal_progress_percent(&g), 50.0);
        g.current_value = 15.0;
        g.status = GoalStatus::Completed;
        assert_eq!(goal_progress_percent(&g), 150.0);
    }

    #[test]
    fn test_category_breakdown_partitions_known_categories() {
        let store = GoalStore::new(vec![
            goal_fixture("p1", "1", "Physical Health", GoalStatus::Completed, true),
            goal_fixture("p2", "1", "Physical Health", GoalStatus::InProgress, true),
            goal_fixture("m1", "1", "Mental Health", GoalStatus::NotStarted, false),
            goal_fixture("n1", "1", "Nutrition", GoalStatus::Completed, false),
            goal_fixture("x1", "1", "Finance", GoalStatus::Completed, true),
            goal_fixture("x2", "1", "nutrition", GoalStatus::Completed, true),
            goal_fixture("o1", "2", "Nutrition", GoalStatus::InProgress, true),
        ]);

        let breakdown = category_breakdown(&store, "1");
        assert_eq!(breakdown.len(), 3);

        let physical = &breakdown[0];
        assert_eq!(physical.category, GoalCategory::PhysicalHealth);
        assert_eq!((physical.completed, physical.in_progress, physical.total), (1, 1, 2));
        assert_eq!(physical.completion_rate, 50.0);

        let mental = &breakdown[1];
        assert_eq!((mental.completed, mental.in_progress, mental.total), (0, 0, 1));
        assert_eq!(mental.completion_rate, 0.0);

        let nutrition = &breakdown[2];
        assert_eq!((nutrition.completed, nutrition.total), (1, 1));
        assert_eq!(nutrition.completion_rate, 100.0);

        let bucketed: usize = breakdown.iter().map(|c| c.total).sum();
        assert_eq!(bucketed, 4);
    }

    #[test]
    fn test_category_breakdown_for_unknown_user() {
        let breakdown = category_breakdown(&GoalStore::default(), "nobody");
        assert_eq!(breakdown.len(), 3);
        assert!(breakdown.iter().all(|c| c.total == 0 && c.completion_rate == 0.0));
    }

    #[test]
    fn test_aggregate_stats() {
        let store = GoalStore::new(vec![
            goal_fixture("a", "1", "Physical Health", GoalStatus::Completed, true),
            goal_fixture("b", "1", "Mental Health", GoalStatus::InProgress, true),
            goal_fixture("c", "1", "Nutrition", GoalStatus::Completed, false),
            goal_fixture("d", "1", "Nutrition", GoalStatus::Failed, false),
            goal_fixture("e", "2", "Nutrition", GoalStatus::Completed, true),
        ]);

        let stats = aggregate_stats(&store, "1");
        assert_eq!(stats.user_id, "1");
        assert_eq!(
            stats.counts,
            StatusCounts {
                completed: 2,
                in_progress: 1,
                not_started: 0,
                failed: 1,
                total: 4,
            }
        );
        assert_eq!(stats.completion_rate, 50.0);
        assert_eq!(stats.health_bonus_eligibility, 50.0);
        assert_eq!(stats.bonus_standing(), BonusStanding::NeedsAttention);
        assert_eq!(stats.performance_impact(), PerformanceImpact::Medium);
    }

    #[test]
    fn test_standing_and_impact_thresholds() {
        assert_eq!(BonusStanding::from_eligibility(75.0), BonusStanding::OnTrack);
        assert_eq!(BonusStanding::from_eligibility(74.9), BonusStanding::NeedsAttention);
        assert_eq!(PerformanceImpact::from_completion_rate(70.0), PerformanceImpact::High);
        assert_eq!(PerformanceImpact::from_completion_rate(40.0), PerformanceImpact::Medium);
        assert_eq!(PerformanceImpact::from_completion_rate(39.9), PerformanceImpact::Low);
    }

    #[test]
    fn test_category_label_lookup() {
        assert_eq!(GoalCategory::from_label("Nutrition"), Some(GoalCategory::Nutrition));
        assert_eq!(GoalCategory::from_label("nutrition"), None);
    }
}
