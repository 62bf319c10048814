use crate::response::ApiResponse;
use crate::routes::DEMO_USER_ID;
use crate::services::lessons;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// GET /api/lessons
///
/// Lists all lessons in display order with the demo user's progress.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "title": "Basic Arithmetic",
///       "description": "Addition and subtraction warm-up",
///       "progress": 0.5,
///       "total_problems": 2,
///       "correct": 1
///     }
///   ],
///   "message": "Lessons retrieved successfully"
/// }
/// ```
pub async fn list_lessons(State(state): State<AppState>) -> Response {
    match lessons::list_lessons(state.db(), DEMO_USER_ID).await {
        Ok(items) => (
            StatusCode::OK,
            Json(ApiResponse::success(items, "Lessons retrieved successfully")),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to list lessons: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response()
        }
    }
}

/// GET /api/lessons/{lesson_id}
///
/// Fetches one lesson with its problems. Option rows carry only `id` and
/// `text`; correctness flags and canonical input answers are never exposed.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "title": "Basic Arithmetic",
///     "description": "Addition and subtraction warm-up",
///     "progress": 0.0,
///     "problems": [
///       {"id": 1, "type": "mcq", "prompt": "What is 2 + 3?", "options": [{"id": 1, "text": "4"}]},
///       {"id": 2, "type": "input", "prompt": "What is 10 - 4?"}
///     ]
///   },
///   "message": "Lesson retrieved successfully"
/// }
/// ```
///
/// - `404 Not Found` when the lesson does not exist.
pub async fn get_lesson(State(state): State<AppState>, Path(lesson_id): Path<i64>) -> Response {
    match lessons::lesson_detail(state.db(), DEMO_USER_ID, lesson_id).await {
        Ok(Some(detail)) => (
            StatusCode::OK,
            Json(ApiResponse::success(detail, "Lesson retrieved successfully")),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Lesson not found")),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to fetch lesson {lesson_id}: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response()
        }
    }
}
