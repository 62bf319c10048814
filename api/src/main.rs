use api::routes::routes;
use api::services::submission::SubmissionEngine;
use api::state::AppState;
use axum::Router;
use common::config::Config;
use common::logger::init_logging;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let config = Config::init(".env");
    let _log_guard = init_logging(&config.log_file, &config.log_level, config.log_to_stdout);

    // Set up dependencies
    let db = db::connect().await;
    let engine = SubmissionEngine::new(config.xp_per_correct);
    let state = AppState::new(db, engine);

    // Configure middleware
    let cors = CorsLayer::very_permissive();

    // Build app router
    let app = Router::new()
        .nest("/api", routes())
        .with_state(state)
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}:{}",
        config.project_name, config.host, config.port
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Server crashed");
}
