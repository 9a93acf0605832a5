//! Plain-text rendering of goal statistics.
//!
//! These functions only format data produced by the stats, roll-up and activity
//! modules; they never compute rates or totals themselves.

use crate::{
    core::{
        activity::{LeaderboardEntry, UserProgress},
        rollup::TeamRollup,
        stats::{AggregateStats, BonusStanding, PerformanceImpact, goal_progress_percent},
    },
    entities::{GoalPriority, goal},
};

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
///
/// # Arguments
/// * `progress_percent` - Progress percentage; values outside 0-100 are clamped in the bar only
/// * `bar_length` - Length of the progress bar in characters (default 10)
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // clamped_progress is in [0, 100] and length is small, so the result is in [0, length]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

const fn standing_label(standing: BonusStanding) -> &'static str {
    match standing {
        BonusStanding::OnTrack => "on track for the health bonus",
        BonusStanding::NeedsAttention => "complete more health goals to qualify",
    }
}

const fn impact_label(impact: PerformanceImpact) -> &'static str {
    match impact {
        PerformanceImpact::High => "High Impact",
        PerformanceImpact::Medium => "Medium Impact",
        PerformanceImpact::Low => "Low Impact",
    }
}

/// One-line summary of a goal, e.g.
/// `[high] Daily Meditation 12/30 sessions (40.0%) due 2024-04-01`
#[must_use]
pub fn format_goal_line(goal: &goal::Model) -> String {
    let priority = match goal.priority {
        GoalPriority::High => "high",
        GoalPriority::Medium => "medium",
        GoalPriority::Low => "low",
    };
    format!(
        "[{priority}] {} {}/{} {} ({:.1}%) due {}",
        goal.title,
        goal.current_value,
        goal.target_value,
        goal.unit,
        goal_progress_percent(goal),
        goal.end_date
    )
}

/// Joins rendered lines, terminating each with a newline
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Multi-line summary of one user's statistics.
#[must_use]
pub fn format_user_summary(stats: &AggregateStats, display_name: &str) -> String {
    let counts = &stats.counts;
    let mut lines = vec![
        format!("Goals for {display_name}"),
        format!(
            "  Completion: {} ({})",
            format_progress_bar(stats.completion_rate, None),
            impact_label(stats.performance_impact())
        ),
        format!(
            "  {} completed, {} in progress, {} not started, {} failed",
            counts.completed, counts.in_progress, counts.not_started, counts.failed
        ),
        format!(
            "  Health bonus: {} - {}",
            format_progress_bar(stats.health_bonus_eligibility, None),
            standing_label(stats.bonus_standing())
        ),
    ];
    lines.extend(stats.categories.iter().map(|category| {
        format!(
            "  {:<16} {}/{} completed ({:.0}%)",
            category.category.as_str(),
            category.completed,
            category.total,
            category.completion_rate
        )
    }));

    join_lines(&lines)
}

/// Multi-line team overview: team means followed by one line per member.
///
/// `display_name` resolves user ids to names.
#[must_use]
pub fn format_team_rollup<F>(rollup: &TeamRollup, display_name: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut lines = vec![
        format!("Team of {} direct reports", rollup.member_count()),
        format!(
            "  Average goal completion: {}",
            format_progress_bar(rollup.team_completion_rate, None)
        ),
        format!(
            "  Health bonus eligibility: {}",
            format_progress_bar(rollup.team_bonus_eligibility, None)
        ),
    ];

    lines.extend(rollup.per_user.iter().map(|(user_id, stats)| {
        let eligible_marker = match stats.bonus_standing() {
            BonusStanding::OnTrack => " *",
            BonusStanding::NeedsAttention => "",
        };
        format!(
            "  {}: {}/{} goals, {:.0}% eligible{}",
            display_name(user_id),
            stats.counts.completed,
            stats.counts.total,
            stats.health_bonus_eligibility,
            eligible_marker
        )
    }));

    join_lines(&lines)
}

/// Points totals for one user, with their leaderboard rank when known.
#[must_use]
pub fn format_points_summary(progress: &UserProgress, rank: Option<usize>) -> String {
    let mut lines = vec![format!(
        "Points: {:.0} from {} activities ({} today)",
        progress.total_points, progress.total_activities, progress.completed_today
    )];
    if let Some(rank) = rank {
        lines.push(format!("  Leaderboard rank: #{rank}"));
    }
    join_lines(&lines)
}

/// The first `limit` leaderboard rows, one per line.
#[must_use]
pub fn format_leaderboard(entries: &[LeaderboardEntry], limit: usize) -> String {
    let mut lines = vec!["Leaderboard".to_string()];
    lines.extend(entries.iter().take(limit).map(|entry| {
        let department = entry
            .department
            .as_deref()
            .map_or_else(String::new, |department| format!(" ({department})"));
        format!(
            "  #{} {}{} - {:.0} pts",
            entry.rank, entry.name, department, entry.points
        )
    }));
    join_lines(&lines)
}
