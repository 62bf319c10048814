use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Represents a learner in the `users` table.
///
/// Streak and XP fields are mutated only by the submission engine; everything
/// else is fixed at provisioning time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique display name.
    pub username: String,
    /// Cumulative experience points. Monotonically non-decreasing.
    pub total_xp: i64,
    /// Consecutive UTC calendar days with at least one submission.
    pub current_streak: i64,
    /// Running maximum of `current_streak`. Always >= `current_streak`.
    pub best_streak: i64,
    /// UTC calendar date of the last streak-advancing submission, if any.
    pub last_activity_utc_date: Option<Date>,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Submission audit rows written on this user's behalf.
    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,

    /// Per-problem progress ledger entries.
    #[sea_orm(has_many = "super::user_problem_progress::Entity")]
    UserProblemProgress,

    /// Per-lesson progress rollups.
    #[sea_orm(has_many = "super::user_lesson_progress::Entity")]
    UserLessonProgress,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::user_problem_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProblemProgress.def()
    }
}

impl Related<super::user_lesson_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLessonProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
