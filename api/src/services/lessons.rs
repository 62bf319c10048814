use std::collections::HashMap;

use db::models::problem::ProblemKind;
use db::models::{
    Lesson, Problem, ProblemOption, UserLessonProgress, lesson, problem, problem_option,
    user_lesson_progress,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;

use super::progress;

/// One row of the lesson list.
#[derive(Debug, Serialize)]
pub struct LessonSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub progress: f64,
    pub total_problems: i64,
    pub correct: i64,
}

/// Client view of a problem. Correctness flags and canonical input answers
/// are deliberately absent.
#[derive(Debug, Serialize)]
pub struct ProblemView {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionView>>,
}

#[derive(Debug, Serialize)]
pub struct OptionView {
    pub id: i64,
    pub text: String,
}

/// Lesson detail with its (answer-free) problem set.
#[derive(Debug, Serialize)]
pub struct LessonDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub progress: f64,
    pub problems: Vec<ProblemView>,
}

/// Lists every lesson in display order with the user's progress.
///
/// Correct counts come from the per-lesson rollup the submission engine
/// maintains; lessons the user never submitted to default to zero.
pub async fn list_lessons<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<LessonSummary>, DbErr> {
    let lessons = Lesson::find()
        .order_by_asc(lesson::Column::Position)
        .all(conn)
        .await?;
    let rollups: HashMap<i64, i64> = UserLessonProgress::find()
        .filter(user_lesson_progress::Column::UserId.eq(user_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|rollup| (rollup.lesson_id, rollup.correct_count))
        .collect();

    let mut result = Vec::with_capacity(lessons.len());
    for lesson in lessons {
        let total = Problem::find()
            .filter(problem::Column::LessonId.eq(lesson.id))
            .count(conn)
            .await? as i64;
        let correct = rollups.get(&lesson.id).copied().unwrap_or(0);
        let ratio = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };
        result.push(LessonSummary {
            id: lesson.id,
            title: lesson.title,
            description: lesson.description,
            progress: progress::round4(ratio),
            total_problems: total,
            correct,
        });
    }
    Ok(result)
}

/// Fetches one lesson with its problems, or None if the lesson is unknown.
/// Progress is computed live from the per-problem ledger.
pub async fn lesson_detail<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    lesson_id: i64,
) -> Result<Option<LessonDetail>, DbErr> {
    let Some(lesson) = Lesson::find_by_id(lesson_id).one(conn).await? else {
        return Ok(None);
    };

    let problems = Problem::find()
        .filter(problem::Column::LessonId.eq(lesson_id))
        .order_by_asc(problem::Column::Id)
        .all(conn)
        .await?;
    let problem_ids: Vec<i64> = problems.iter().map(|p| p.id).collect();

    let mut options_by_problem: HashMap<i64, Vec<OptionView>> = HashMap::new();
    if !problem_ids.is_empty() {
        let options = ProblemOption::find()
            .filter(problem_option::Column::ProblemId.is_in(problem_ids.clone()))
            .order_by_asc(problem_option::Column::Id)
            .all(conn)
            .await?;
        for option in options {
            options_by_problem
                .entry(option.problem_id)
                .or_default()
                .push(OptionView {
                    id: option.id,
                    text: option.text,
                });
        }
    }

    let ratio = progress::completion_ratio(conn, user_id, &problem_ids).await?;
    let problems = problems
        .into_iter()
        .map(|p| ProblemView {
            id: p.id,
            kind: p.kind,
            prompt: p.prompt,
            options: match p.kind {
                ProblemKind::Mcq => Some(options_by_problem.remove(&p.id).unwrap_or_default()),
                ProblemKind::Input => None,
            },
        })
        .collect();

    Ok(Some(LessonDetail {
        id: lesson.id,
        title: lesson.title,
        description: lesson.description,
        progress: progress::round4(ratio),
        problems,
    }))
}
