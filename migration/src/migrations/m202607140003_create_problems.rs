use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202607140003_create_problems"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("problems"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("lesson_id")).big_integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("kind"))
                            .enumeration(
                                Alias::new("problem_kind_enum"),
                                vec![Alias::new("mcq"), Alias::new("input")],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("prompt")).text().not_null())
                    .col(ColumnDef::new(Alias::new("answer_text")).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("problems"), Alias::new("lesson_id"))
                            .to(Alias::new("lessons"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("problems")).to_owned())
            .await
    }
}
