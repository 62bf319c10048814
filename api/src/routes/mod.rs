//! HTTP route entry points for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe
//! - `/lessons` → lesson list, lesson detail, and submission processing
//! - `/profile` → demo-user profile and overall progress
//!
//! Handlers stay thin: queries live in [`crate::services`], and the submit
//! handler owns the transaction around the submission engine.

use crate::routes::{health::health_routes, lessons::lessons_routes, profile::profile_routes};
use crate::state::AppState;
use axum::Router;

pub mod health;
pub mod lessons;
pub mod profile;

/// The single demo account every route acts on behalf of. Authentication is
/// out of scope for this app.
pub const DEMO_USER_ID: i64 = 1;

/// Builds the application router for all HTTP endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/lessons", lessons_routes())
        .nest("/profile", profile_routes())
}
