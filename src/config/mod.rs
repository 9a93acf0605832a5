/// Database configuration and connection management
pub mod database;

/// Team directory built from the fixture users and teams
pub mod directory;

/// Goal fixture loading from goals.toml
pub mod goals;
