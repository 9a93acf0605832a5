//! Manager roll-up of direct reports' goal statistics.
//!
//! The organisational hierarchy is not modelled here. Callers inject it through
//! [`DirectReports`]; this module only aggregates.

use crate::core::{
    stats::{AggregateStats, aggregate_stats},
    store::GoalStore,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use tracing::debug;

/// Lookup from a manager to the users reporting directly to them
pub trait DirectReports {
    /// Direct reports of `manager_id`; empty when the user manages nobody
    fn direct_reports_of(&self, manager_id: &str) -> Vec<String>;
}

impl<S: BuildHasher> DirectReports for HashMap<String, Vec<String>, S> {
    fn direct_reports_of(&self, manager_id: &str) -> Vec<String> {
        self.get(manager_id).cloned().unwrap_or_default()
    }
}

/// Per-member statistics plus unweighted team means.
///
/// Every member counts once towards the means regardless of how many goals
/// they hold, so teams of different sizes are not directly comparable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamRollup {
    /// Statistics keyed by user id
    pub per_user: BTreeMap<String, AggregateStats>,
    /// Mean of the members' completion rates
    pub team_completion_rate: f64,
    /// Mean of the members' health bonus eligibility
    pub team_bonus_eligibility: f64,
}

impl TeamRollup {
    /// Number of distinct members in the roll-up
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.per_user.len()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        return 0.0;
    }
    sum / f64::from(count)
}

/// Aggregates the given users. Repeated ids are counted once.
#[must_use]
pub fn team_rollup<S: AsRef<str>>(store: &GoalStore, user_ids: &[S]) -> TeamRollup {
    let per_user: BTreeMap<String, AggregateStats> = user_ids
        .iter()
        .map(|user_id| {
            let user_id = user_id.as_ref();
            (user_id.to_string(), aggregate_stats(store, user_id))
        })
        .collect();

    let team_completion_rate = mean(per_user.values().map(|stats| stats.completion_rate));
    let team_bonus_eligibility =
        mean(per_user.values().map(|stats| stats.health_bonus_eligibility));

    debug!(
        "Rolled up {} team members: completion {:.1}%, bonus eligibility {:.1}%",
        per_user.len(),
        team_completion_rate,
        team_bonus_eligibility
    );

    TeamRollup {
        per_user,
        team_completion_rate,
        team_bonus_eligibility,
    }
}

/// Aggregates the direct reports of `manager_id`.
#[must_use]
pub fn manager_rollup<D>(store: &GoalStore, directory: &D, manager_id: &str) -> TeamRollup
where
    D: DirectReports + ?Sized,
{
    let reports = directory.direct_reports_of(manager_id);
    debug!("Manager {} has {} direct reports", manager_id, reports.len());
    team_rollup(store, reports.as_slice())
}
