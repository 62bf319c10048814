use db::models::{Problem, UserProblemProgress, user_problem_progress};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

/// Rounds a ratio to 4 decimal places for API payloads and audit snapshots.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Records the outcome of one graded answer in the progress ledger.
///
/// The ledger is a high-water mark: a false outcome is never stored and an
/// existing true entry is never overwritten, so entries only move
/// absent→true or false→true.
pub async fn record_answer<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    problem_id: i64,
    is_correct: bool,
) -> Result<(), DbErr> {
    if !is_correct {
        return Ok(());
    }

    let existing = UserProblemProgress::find()
        .filter(user_problem_progress::Column::UserId.eq(user_id))
        .filter(user_problem_progress::Column::ProblemId.eq(problem_id))
        .one(conn)
        .await?;

    match existing {
        Some(entry) if entry.is_correct => Ok(()),
        Some(entry) => {
            let mut active: user_problem_progress::ActiveModel = entry.into();
            active.is_correct = Set(true);
            active.update(conn).await?;
            Ok(())
        }
        None => {
            user_problem_progress::ActiveModel {
                id: NotSet,
                user_id: Set(user_id),
                problem_id: Set(problem_id),
                is_correct: Set(true),
            }
            .insert(conn)
            .await?;
            Ok(())
        }
    }
}

/// Count of the given problems the user has ever answered correctly.
pub async fn correct_count<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    problem_ids: &[i64],
) -> Result<u64, DbErr> {
    if problem_ids.is_empty() {
        return Ok(0);
    }
    UserProblemProgress::find()
        .filter(user_problem_progress::Column::UserId.eq(user_id))
        .filter(user_problem_progress::Column::ProblemId.is_in(problem_ids.iter().copied()))
        .filter(user_problem_progress::Column::IsCorrect.eq(true))
        .count(conn)
        .await
}

/// Fraction of the given problems answered correctly, in [0, 1].
/// An empty id set yields 0.0 rather than dividing by zero.
pub async fn completion_ratio<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    problem_ids: &[i64],
) -> Result<f64, DbErr> {
    if problem_ids.is_empty() {
        return Ok(0.0);
    }
    let correct = correct_count(conn, user_id, problem_ids).await?;
    Ok(correct as f64 / problem_ids.len() as f64)
}

/// Completion ratio across every problem in the catalog (profile view).
pub async fn overall_ratio<C: ConnectionTrait>(conn: &C, user_id: i64) -> Result<f64, DbErr> {
    let total = Problem::find().count(conn).await?;
    if total == 0 {
        return Ok(0.0);
    }
    let correct = UserProblemProgress::find()
        .filter(user_problem_progress::Column::UserId.eq(user_id))
        .filter(user_problem_progress::Column::IsCorrect.eq(true))
        .count(conn)
        .await?;
    Ok(correct as f64 / total as f64)
}
