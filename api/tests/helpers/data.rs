use chrono::{NaiveDate, Utc};
use db::models::problem::ProblemKind;
use db::models::{lesson, problem, problem_option, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, NotSet, Set};
use serde_json::{Value, json};

/// A seeded lesson mirroring the canonical scenario: one mcq problem
/// (options 3 / 4 / 5, correct "4") and one input problem (answer "12").
pub struct LessonFixture {
    pub lesson: lesson::Model,
    pub mcq: problem::Model,
    pub mcq_wrong: problem_option::Model,
    pub mcq_correct: problem_option::Model,
    pub input: problem::Model,
}

pub async fn create_demo_user(db: &DatabaseConnection) -> user::Model {
    create_user_with_streak(db, 0, 0, None).await
}

pub async fn create_user_with_streak(
    db: &DatabaseConnection,
    current_streak: i64,
    best_streak: i64,
    last_activity: Option<NaiveDate>,
) -> user::Model {
    user::ActiveModel {
        id: Set(1),
        username: Set("demo".to_string()),
        total_xp: Set(0),
        current_streak: Set(current_streak),
        best_streak: Set(best_streak),
        last_activity_utc_date: Set(last_activity),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to create user")
}

pub async fn create_lesson(db: &DatabaseConnection, title: &str, position: i64) -> LessonFixture {
    let lesson = lesson::ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        description: Set("Test".to_string()),
        position: Set(position),
    }
    .insert(db)
    .await
    .expect("Failed to create lesson");

    let mcq = problem::ActiveModel {
        id: NotSet,
        lesson_id: Set(lesson.id),
        kind: Set(ProblemKind::Mcq),
        prompt: Set("What is 2 + 2?".to_string()),
        answer_text: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to create mcq problem");

    let mcq_wrong = create_option(db, mcq.id, "3", false).await;
    let mcq_correct = create_option(db, mcq.id, "4", true).await;
    create_option(db, mcq.id, "5", false).await;

    let input = problem::ActiveModel {
        id: NotSet,
        lesson_id: Set(lesson.id),
        kind: Set(ProblemKind::Input),
        prompt: Set("What is 3 x 4?".to_string()),
        answer_text: Set(Some("12".to_string())),
    }
    .insert(db)
    .await
    .expect("Failed to create input problem");

    LessonFixture {
        lesson,
        mcq,
        mcq_wrong,
        mcq_correct,
        input,
    }
}

pub async fn create_empty_lesson(db: &DatabaseConnection, position: i64) -> lesson::Model {
    lesson::ActiveModel {
        id: NotSet,
        title: Set("Empty Lesson".to_string()),
        description: Set("No problems yet".to_string()),
        position: Set(position),
    }
    .insert(db)
    .await
    .expect("Failed to create lesson")
}

async fn create_option(
    db: &DatabaseConnection,
    problem_id: i64,
    text: &str,
    is_correct: bool,
) -> problem_option::Model {
    problem_option::ActiveModel {
        id: NotSet,
        problem_id: Set(problem_id),
        text: Set(text.to_string()),
        is_correct: Set(is_correct),
    }
    .insert(db)
    .await
    .expect("Failed to create option")
}

/// Answers that solve both problems of a `LessonFixture`.
pub fn full_correct_answers(fixture: &LessonFixture) -> Value {
    json!([
        {"problem_id": fixture.mcq.id, "option_id": fixture.mcq_correct.id},
        {"problem_id": fixture.input.id, "value": "12"},
    ])
}

pub fn attempt_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
