use crate::seed::Seeder;
use async_trait::async_trait;
use chrono::Utc;
use db::models::{User, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};

/// The single demo account the app serves. All routes act on user id 1.
pub struct DemoUserSeeder;

#[async_trait]
impl Seeder for DemoUserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if User::find_by_id(1).one(db).await?.is_some() {
            return Ok(());
        }

        user::ActiveModel {
            id: Set(1),
            username: Set("demo".to_string()),
            total_xp: Set(0),
            current_streak: Set(0),
            best_streak: Set(0),
            last_activity_utc_date: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        Ok(())
    }
}
