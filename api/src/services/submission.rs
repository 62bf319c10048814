use std::collections::HashMap;

use chrono::Utc;
use db::models::{
    Lesson, Problem, ProblemOption, Submission, User, UserLessonProgress, problem,
    problem_option, submission, user, user_lesson_progress,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter,
    Set, SqlErr,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::grader;
use super::progress;
use super::streak::{self, StreakSnapshot};

/// Ways a submission can fail. All are request-scoped: the HTTP layer maps
/// each kind to a status code and rolls the transaction back, so a failed
/// submission leaves no state behind.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Malformed or semantically invalid input: bad payload shape, unknown
    /// lesson or user, empty lesson, answer shape not matching the problem.
    #[error("{0}")]
    Validation(String),
    /// A referenced problem exists but does not belong to the target lesson.
    #[error("{0}")]
    InvalidProblem(String),
    /// The attempt token was already processed; the original submission's
    /// effects remain the single source of truth.
    #[error("{0}")]
    DuplicateAttempt(String),
    /// Storage failure unrelated to the submission itself.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// One submitted answer. `option_id` is read for mcq problems and `value`
/// for input problems; the grader rejects whichever is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerItem {
    pub problem_id: i64,
    pub option_id: Option<i64>,
    pub value: Option<Value>,
}

/// Snapshot returned to the client after a processed submission. Mirrors the
/// audit columns written to the submissions table.
#[derive(Debug, Serialize)]
pub struct SubmissionOutcome {
    pub correct_count: i64,
    pub earned_xp: i64,
    pub new_total_xp: i64,
    pub streak: StreakSnapshot,
    pub lesson_progress: f64,
}

/// The submission state machine: validates a payload, enforces the
/// attempt-token idempotency guarantee, grades each answer, updates the
/// progress ledger, XP and streak, and appends the audit record.
///
/// Constructed once at startup; `xp_per_correct` comes in through the
/// constructor rather than ambient configuration so the engine is testable
/// in isolation.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionEngine {
    xp_per_correct: i64,
}

impl SubmissionEngine {
    pub fn new(xp_per_correct: i64) -> Self {
        Self { xp_per_correct }
    }

    /// Processes one submission inside the caller's transaction.
    ///
    /// The engine never commits or rolls back; any `Err` must make the
    /// caller discard the transaction so no partial mutation is visible.
    pub async fn submit<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        lesson_id: i64,
        payload: &Value,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let (attempt_token, raw_answers) = parse_payload(payload)?;

        // Fast-path duplicate check. The unique constraint on attempt_token
        // remains the authoritative guard at insert time below.
        let existing = Submission::find()
            .filter(submission::Column::AttemptToken.eq(attempt_token.as_str()))
            .one(conn)
            .await?;
        if existing.is_some() {
            return Err(duplicate_attempt(&attempt_token));
        }

        Lesson::find_by_id(lesson_id)
            .one(conn)
            .await?
            .ok_or_else(|| SubmitError::Validation("Lesson not found".into()))?;
        let user = User::find_by_id(user_id)
            .one(conn)
            .await?
            .ok_or_else(|| SubmitError::Validation("User not found".into()))?;

        let problems = Problem::find()
            .filter(problem::Column::LessonId.eq(lesson_id))
            .all(conn)
            .await?;
        if problems.is_empty() {
            return Err(SubmitError::Validation("Lesson has no problems".into()));
        }
        let problem_ids: Vec<i64> = problems.iter().map(|p| p.id).collect();
        let problems_by_id: HashMap<i64, &problem::Model> =
            problems.iter().map(|p| (p.id, p)).collect();

        let options = ProblemOption::find()
            .filter(problem_option::Column::ProblemId.is_in(problem_ids.clone()))
            .all(conn)
            .await?;
        let mut options_by_problem: HashMap<i64, Vec<problem_option::Model>> = HashMap::new();
        for option in options {
            options_by_problem
                .entry(option.problem_id)
                .or_default()
                .push(option);
        }

        // Grade in submitted order. The first invalid answer aborts the whole
        // submission, so a rejected submission persists no partial credit.
        let mut correct_count: i64 = 0;
        for raw in raw_answers {
            let answer = parse_answer_item(raw)?;
            let problem = *problems_by_id.get(&answer.problem_id).ok_or_else(|| {
                SubmitError::InvalidProblem(format!(
                    "Problem {} not found in lesson {}",
                    answer.problem_id, lesson_id
                ))
            })?;
            let option_rows = options_by_problem
                .get(&problem.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let is_correct = grader::grade(problem, option_rows, &answer)?;
            if is_correct {
                correct_count += 1;
            }
            progress::record_answer(conn, user_id, problem.id, is_correct).await?;
        }

        let earned_xp = correct_count * self.xp_per_correct;
        let new_total_xp = user.total_xp + earned_xp;

        // One day boundary per submission.
        let today = Utc::now().date_naive();
        let update = streak::next_streak(user.last_activity_utc_date, user.current_streak, today);
        let (current_streak, best_streak) = if update.advanced {
            (update.streak, user.best_streak.max(update.streak))
        } else {
            (user.current_streak, user.best_streak)
        };

        let mut user_active: user::ActiveModel = user.into();
        user_active.total_xp = Set(new_total_xp);
        if update.advanced {
            user_active.current_streak = Set(current_streak);
            user_active.best_streak = Set(best_streak);
            user_active.last_activity_utc_date = Set(Some(today));
        }
        user_active.update(conn).await?;

        // Progress over the whole lesson, not just the answered subset.
        let lesson_correct = progress::correct_count(conn, user_id, &problem_ids).await?;
        let lesson_progress = lesson_correct as f64 / problem_ids.len() as f64;
        upsert_lesson_rollup(
            conn,
            user_id,
            lesson_id,
            lesson_correct as i64,
            problem_ids.len() as i64,
        )
        .await?;

        let inserted = submission::ActiveModel {
            id: NotSet,
            attempt_token: Set(attempt_token.clone()),
            user_id: Set(user_id),
            lesson_id: Set(lesson_id),
            created_at: Set(Utc::now()),
            correct_count: Set(correct_count),
            earned_xp: Set(earned_xp),
            total_xp_after: Set(new_total_xp),
            current_streak_after: Set(current_streak),
            best_streak_after: Set(best_streak),
            lesson_progress_after: Set(lesson_progress),
        }
        .insert(conn)
        .await;
        if let Err(err) = inserted {
            // Two requests raced on the same token; the constraint decided.
            if is_unique_violation(&err) {
                return Err(duplicate_attempt(&attempt_token));
            }
            return Err(err.into());
        }

        Ok(SubmissionOutcome {
            correct_count,
            earned_xp,
            new_total_xp,
            streak: StreakSnapshot {
                current: current_streak,
                best: best_streak,
            },
            lesson_progress: progress::round4(lesson_progress),
        })
    }
}

fn duplicate_attempt(attempt_token: &str) -> SubmitError {
    SubmitError::DuplicateAttempt(format!(
        "attempt_token '{attempt_token}' was already processed"
    ))
}

fn parse_payload(payload: &Value) -> Result<(String, &[Value]), SubmitError> {
    let attempt_token = payload
        .get("attempt_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| SubmitError::Validation("attempt_token is required".into()))?
        .to_string();
    let answers = payload
        .get("answers")
        .and_then(Value::as_array)
        .filter(|answers| !answers.is_empty())
        .ok_or_else(|| SubmitError::Validation("answers must be a non-empty list".into()))?;
    Ok((attempt_token, answers.as_slice()))
}

fn parse_answer_item(raw: &Value) -> Result<AnswerItem, SubmitError> {
    if !raw.is_object() {
        return Err(SubmitError::Validation("answer items must be objects".into()));
    }
    serde_json::from_value(raw.clone())
        .map_err(|err| SubmitError::Validation(format!("invalid answer item: {err}")))
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

async fn upsert_lesson_rollup<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    lesson_id: i64,
    correct_count: i64,
    total_problems: i64,
) -> Result<(), DbErr> {
    let existing = UserLessonProgress::find()
        .filter(user_lesson_progress::Column::UserId.eq(user_id))
        .filter(user_lesson_progress::Column::LessonId.eq(lesson_id))
        .one(conn)
        .await?;

    match existing {
        Some(row) => {
            let mut active: user_lesson_progress::ActiveModel = row.into();
            active.correct_count = Set(correct_count);
            active.total_problems = Set(total_problems);
            active.update(conn).await?;
        }
        None => {
            user_lesson_progress::ActiveModel {
                id: NotSet,
                user_id: Set(user_id),
                lesson_id: Set(lesson_id),
                correct_count: Set(correct_count),
                total_problems: Set(total_problems),
            }
            .insert(conn)
            .await?;
        }
    }
    Ok(())
}
