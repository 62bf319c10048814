use api::routes::routes;
use api::services::submission::SubmissionEngine;
use api::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use sea_orm::DatabaseConnection;
use serde_json::Value;

/// XP rate used by every test app; keeps arithmetic in assertions obvious.
pub const TEST_XP_PER_CORRECT: i64 = 10;

/// Builds the real router against a fresh in-memory database.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = db::test_utils::setup_test_db().await;
    let state = AppState::new(db.clone(), SubmissionEngine::new(TEST_XP_PER_CORRECT));
    let app = Router::new().nest("/api", routes()).with_state(state);
    (app, db)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
