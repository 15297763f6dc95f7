use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserInterests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserInterests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserInterests::InterestName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserInterests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserInterests::UserId)
                            .col(UserInterests::InterestName),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserInterests::Table, UserInterests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserInterests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserInterests {
    Table,
    UserId,
    InterestName,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
