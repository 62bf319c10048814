use crate::response::ApiResponse;
use crate::routes::DEMO_USER_ID;
use crate::services::progress;
use crate::services::streak::StreakSnapshot;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use db::models::User;
use sea_orm::EntityTrait;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub username: String,
    pub total_xp: i64,
    pub streak: StreakSnapshot,
    pub progress: f64,
}

/// GET /api/profile
///
/// Returns the demo user's profile: cumulative XP, streaks, and completion
/// ratio over every problem in the catalog.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "user_id": 1,
///     "username": "demo",
///     "total_xp": 20,
///     "streak": {"current": 1, "best": 1},
///     "progress": 0.2222
///   },
///   "message": "Profile retrieved successfully"
/// }
/// ```
///
/// - `404 Not Found` when the demo user has not been seeded.
pub async fn get_profile(State(state): State<AppState>) -> Response {
    let user = match User::find_by_id(DEMO_USER_ID).one(state.db()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found")),
            )
                .into_response();
        }
        Err(err) => {
            tracing::error!("Failed to fetch profile: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    };

    let ratio = match progress::overall_ratio(state.db(), user.id).await {
        Ok(ratio) => ratio,
        Err(err) => {
            tracing::error!("Failed to compute overall progress: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    };

    let body = ProfileResponse {
        user_id: user.id,
        username: user.username,
        total_xp: user.total_xp,
        streak: StreakSnapshot {
            current: user.current_streak,
            best: user.best_streak,
        },
        progress: progress::round4(ratio),
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(body, "Profile retrieved successfully")),
    )
        .into_response()
}
