use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Represents one processed submission in the `submissions` table.
///
/// Rows are append-only audit records: each snapshots the user's XP, streak
/// and lesson progress as of immediately after the submission was applied,
/// and is never updated afterwards. `attempt_token` carries a unique
/// constraint; that constraint is the authoritative guard for exactly-once
/// processing.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Client-supplied idempotency key. Globally unique.
    pub attempt_token: String,
    /// ID of the user who submitted.
    pub user_id: i64,
    /// ID of the lesson submitted against.
    pub lesson_id: i64,
    /// Timestamp when the submission was processed.
    pub created_at: DateTime<Utc>,
    /// Answers graded correct in this submission.
    pub correct_count: i64,
    /// XP earned by this submission alone.
    pub earned_xp: i64,
    /// User's cumulative XP after applying this submission.
    pub total_xp_after: i64,
    /// User's current streak after applying this submission.
    pub current_streak_after: i64,
    /// User's best streak after applying this submission.
    pub best_streak_after: i64,
    /// Lesson completion ratio after applying this submission.
    pub lesson_progress_after: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::lesson::Entity",
        from = "Column::LessonId",
        to = "super::lesson::Column::Id"
    )]
    Lesson,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
