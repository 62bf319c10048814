use sea_orm::entity::prelude::*;
use serde::Serialize;

/// The two problem variants the grader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "problem_kind_enum")]
#[serde(rename_all = "lowercase")]
pub enum ProblemKind {
    /// Graded against this problem's option rows, exactly one flagged correct.
    #[sea_orm(string_value = "mcq")]
    Mcq,
    /// Graded against `answer_text`, case-insensitive and whitespace-trimmed.
    #[sea_orm(string_value = "input")]
    Input,
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind_str = match self {
            ProblemKind::Mcq => "mcq",
            ProblemKind::Input => "input",
        };
        write!(f, "{}", kind_str)
    }
}

/// Represents a problem in the `problems` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "problems")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the lesson this problem belongs to.
    pub lesson_id: i64,
    pub kind: ProblemKind,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    /// Canonical answer for `input` problems. Never serialized to clients.
    pub answer_text: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lesson::Entity",
        from = "Column::LessonId",
        to = "super::lesson::Column::Id"
    )]
    Lesson,

    #[sea_orm(has_many = "super::problem_option::Entity")]
    ProblemOption,

    #[sea_orm(has_many = "super::user_problem_progress::Entity")]
    UserProblemProgress,
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl Related<super::problem_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProblemOption.def()
    }
}

impl Related<super::user_problem_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProblemProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
