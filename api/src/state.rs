use crate::services::submission::SubmissionEngine;
use sea_orm::DatabaseConnection;

/// Shared application state: one database handle plus the submission engine
/// constructed from startup configuration.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    engine: SubmissionEngine,
}

impl AppState {
    pub fn new(db: DatabaseConnection, engine: SubmissionEngine) -> Self {
        Self { db, engine }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn engine(&self) -> &SubmissionEngine {
        &self.engine
    }
}
