pub mod models;
pub mod test_utils;

use common::config::Config;
use sea_orm::{Database, DatabaseConnection};
use std::path::Path;

/// Connects to the configured database.
///
/// `DATABASE_PATH` may be a full DSN or a SQLite file path; bare paths get the
/// `sqlite://` scheme prepended, creating parent directories as needed since
/// SQLite will not create intermediate dirs itself. Requires `Config::init`
/// to have run.
pub async fn connect() -> DatabaseConnection {
    let path_or_url = Config::get().database_path.clone();
    let url = if path_or_url.starts_with("sqlite:") || path_or_url.starts_with("postgres://") {
        path_or_url
    } else {
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}")
    };

    Database::connect(&url)
        .await
        .expect("Failed to connect to database")
}
