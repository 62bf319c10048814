use crate::state::AppState;
use axum::{Router, routing};

pub mod get;
pub mod post;

/// Builds the `/lessons` route group.
pub fn lessons_routes() -> Router<AppState> {
    Router::new()
        .route("/", routing::get(get::list_lessons))
        .route("/{lesson_id}", routing::get(get::get_lesson))
        .route("/{lesson_id}/submit", routing::post(post::submit_lesson))
}
