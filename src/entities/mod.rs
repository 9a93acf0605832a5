//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod activity;
pub mod goal;

pub use activity::{Entity as Activity, Model as ActivityModel};
pub use goal::{
    Column as GoalColumn, Entity as Goal, GoalPriority, GoalStatus, Model as GoalModel,
};
