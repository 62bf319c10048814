use crate::state::AppState;
use axum::{Router, routing};

pub mod get;

/// Builds the `/profile` route group.
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", routing::get(get::get_profile))
}
