//! Unified error types for the goal tracking core.
//!
//! Only persistence, configuration, ingestion and activity logging can fail. Store queries and the
//! aggregation functions are total and never produce an [`Error`].

use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No goal exists with the given reference
    #[error("Goal not found: {reference}")]
    GoalNotFound {
        /// External goal reference that was looked up
        reference: String,
    },

    /// Goal record violates a data model invariant and was rejected at ingestion
    #[error("Invalid goal '{reference}': {reason}")]
    InvalidGoal {
        /// External goal reference of the rejected record
        reference: String,
        /// Which invariant was violated
        reason: String,
    },

    /// Progress value is negative or not a number
    #[error("Invalid progress value: {value}")]
    InvalidProgress {
        /// The rejected value
        value: f64,
    },

    /// Goal is marked failed and no longer accepts progress
    #[error("Goal '{reference}' is closed and cannot be updated")]
    GoalClosed {
        /// External goal reference
        reference: String,
    },

    /// No activity type is configured with the given id
    #[error("Unknown activity type: {id}")]
    UnknownActivityType {
        /// Activity type id that was looked up
        id: String,
    },

    /// Logged activity amount is not a positive number
    #[error("Invalid activity value: {value}")]
    InvalidActivityValue {
        /// The rejected value
        value: f64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
