use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202607140001_create_users::Migration),
            Box::new(migrations::m202607140002_create_lessons::Migration),
            Box::new(migrations::m202607140003_create_problems::Migration),
            Box::new(migrations::m202607140004_create_problem_options::Migration),
            Box::new(migrations::m202607140005_create_submissions::Migration),
            Box::new(migrations::m202607140006_create_user_problem_progress::Migration),
            Box::new(migrations::m202607140007_create_user_lesson_progress::Migration),
        ]
    }
}
