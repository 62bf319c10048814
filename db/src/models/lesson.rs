use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Represents a lesson in the `lessons` table.
///
/// Lessons are read-only from the engine's perspective; content is loaded by
/// the seeder.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Ordering key used when listing lessons.
    pub position: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::problem::Entity")]
    Problem,

    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,

    #[sea_orm(has_many = "super::user_lesson_progress::Entity")]
    UserLessonProgress,
}

impl Related<super::problem::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Problem.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::user_lesson_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLessonProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
