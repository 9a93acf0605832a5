//! Activity entity - One logged wellness activity and the points it earned.
//!
//! Points are computed once when the activity is logged, from the activity
//! type's `points_per_unit`, and stored with the record so later changes to the
//! catalogue do not rewrite history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    /// Auto-incremented id; defines logging order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who logged the activity
    pub user_id: String,
    /// Id of the activity type, e.g. `"steps"` or `"water"`
    pub activity_type: String,
    /// Amount logged, in the activity type's unit
    pub value: f64,
    /// Points earned: `value * points_per_unit`
    pub points: f64,
    /// When the activity was logged
    pub logged_at: DateTimeUtc,
}

/// Activities have no relations to other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
