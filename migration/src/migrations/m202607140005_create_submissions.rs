use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202607140005_create_submissions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("submissions"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    // The unique constraint here is the linearization point for
                    // exactly-once submission processing.
                    .col(ColumnDef::new(Alias::new("attempt_token")).string().not_null().unique_key())
                    .col(ColumnDef::new(Alias::new("user_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("lesson_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("correct_count")).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("earned_xp")).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("total_xp_after")).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("current_streak_after")).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("best_streak_after")).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("lesson_progress_after")).double().not_null().default(0.0))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("submissions"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("submissions"), Alias::new("lesson_id"))
                            .to(Alias::new("lessons"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("submissions")).to_owned())
            .await
    }
}
