use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Contents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Contents::Title).string().not_null())
                    .col(ColumnDef::new(Contents::Description).text())
                    .col(ColumnDef::new(Contents::ThumbnailUrl).string())
                    .col(ColumnDef::new(Contents::VideoUrl).string())
                    .col(
                        ColumnDef::new(Contents::Category)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contents::EpisodeNumber).integer())
                    .col(ColumnDef::new(Contents::DurationSeconds).integer())
                    .col(
                        ColumnDef::new(Contents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Contents::Table)
                    .col(Contents::Category)
                    .name("idx_contents_category")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Contents {
    Table,
    Id,
    Title,
    Description,
    ThumbnailUrl,
    VideoUrl,
    Category,
    EpisodeNumber,
    DurationSeconds,
    CreatedAt,
}
