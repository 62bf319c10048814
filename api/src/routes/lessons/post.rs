use crate::response::ApiResponse;
use crate::routes::DEMO_USER_ID;
use crate::services::submission::SubmitError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::TransactionTrait;
use serde_json::Value;

/// POST /api/lessons/{lesson_id}/submit
///
/// Processes one graded submission for the demo user. The whole operation
/// runs in a single transaction: committed on success, rolled back on any
/// engine error, so a failed submission leaves no partial state.
///
/// ### Request Body
/// ```json
/// {
///   "attempt_token": "0c7e4a33-8f2d-4de1-9c33-1f2b5f3a9a10",
///   "answers": [
///     {"problem_id": 1, "option_id": 2},
///     {"problem_id": 2, "value": "12"}
///   ]
/// }
/// ```
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "correct_count": 2,
///     "earned_xp": 20,
///     "new_total_xp": 20,
///     "streak": {"current": 1, "best": 1},
///     "lesson_progress": 1.0
///   },
///   "message": "Submission processed successfully"
/// }
/// ```
///
/// - `400 Bad Request` malformed payload, unknown lesson/user, empty lesson,
///   or an answer whose shape does not match its problem.
/// - `409 Conflict` the attempt token was already processed.
/// - `422 Unprocessable Entity` a referenced problem does not belong to this
///   lesson.
pub async fn submit_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<i64>,
    Json(payload): Json<Value>,
) -> Response {
    let txn = match state.db().begin().await {
        Ok(txn) => txn,
        Err(err) => {
            tracing::error!("Failed to open transaction: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    };

    match state
        .engine()
        .submit(&txn, DEMO_USER_ID, lesson_id, &payload)
        .await
    {
        Ok(outcome) => {
            if let Err(err) = txn.commit().await {
                tracing::error!("Failed to commit submission: {err}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::error("Database error")),
                )
                    .into_response();
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    outcome,
                    "Submission processed successfully",
                )),
            )
                .into_response()
        }
        Err(err) => {
            let _ = txn.rollback().await;
            submit_error_response(err)
        }
    }
}

fn submit_error_response(err: SubmitError) -> Response {
    let (status, message) = match err {
        SubmitError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        SubmitError::InvalidProblem(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        SubmitError::DuplicateAttempt(msg) => (StatusCode::CONFLICT, msg),
        SubmitError::Db(err) => {
            tracing::error!("Submission failed with database error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
