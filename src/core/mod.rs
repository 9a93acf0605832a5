//! Core business logic - framework-agnostic goal storage, aggregation, activity
//! points and reporting.

/// Activity logging, points totals and the leaderboard
pub mod activity;
/// Goal ingestion, seeding and progress updates
pub mod goal;
/// Text rendering of user and team statistics
pub mod report;
/// Manager roll-up over direct reports
pub mod rollup;
/// Completion rate, health bonus eligibility and category breakdowns
pub mod stats;
/// In-memory goal store and list queries
pub mod store;
