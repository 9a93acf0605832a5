//! Team directory built from the fixture file.
//!
//! Maps user ids to display names and managers to their direct reports. This is
//! the organisational lookup injected into the manager roll-up.

use crate::config::goals::{FixtureConfig, UserConfig};
use crate::core::rollup::DirectReports;
use std::collections::HashMap;

/// Users and reporting lines known to the dashboard
#[derive(Debug, Clone, Default)]
pub struct Directory {
    users: HashMap<String, UserConfig>,
    reports: HashMap<String, Vec<String>>,
}

impl Directory {
    /// Builds a directory from the `[[users]]` and `[[teams]]` fixture tables.
    ///
    /// Several `[[teams]]` entries for the same manager are merged in file order.
    #[must_use]
    pub fn from_config(config: &FixtureConfig) -> Self {
        let users = config
            .users
            .iter()
            .map(|user| (user.id.clone(), user.clone()))
            .collect();

        let mut reports: HashMap<String, Vec<String>> = HashMap::new();
        for team in &config.teams {
            let entry = reports.entry(team.manager.clone()).or_default();
            for report in &team.reports {
                if !entry.contains(report) {
                    entry.push(report.clone());
                }
            }
        }

        Self { users, reports }
    }

    /// Display name for a user, falling back to the raw id for unknown users
    #[must_use]
    pub fn display_name(&self, user_id: &str) -> String {
        self.users
            .get(user_id)
            .map_or_else(|| user_id.to_string(), |user| user.name.clone())
    }

    /// Department of a user, if configured
    #[must_use]
    pub fn department(&self, user_id: &str) -> Option<&str> {
        self.users
            .get(user_id)
            .and_then(|user| user.department.as_deref())
    }

    /// Whether the user manages anyone
    #[must_use]
    pub fn is_manager(&self, user_id: &str) -> bool {
        self.reports
            .get(user_id)
            .is_some_and(|reports| !reports.is_empty())
    }
}

impl DirectReports for Directory {
    fn direct_reports_of(&self, manager_id: &str) -> Vec<String> {
        self.reports.get(manager_id).cloned().unwrap_or_default()
    }
}
