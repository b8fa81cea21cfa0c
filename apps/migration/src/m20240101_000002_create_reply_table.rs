use sea_orm_migration::prelude::*;

use crate::auto_id;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key to blog: cascading deletes happen in the service layer.
        manager
            .create_table(
                Table::create()
                    .table(Reply::Table)
                    .if_not_exists()
                    .col(auto_id(manager, Reply::ReplyId))
                    .col(ColumnDef::new(Reply::BlogId).big_integer().not_null())
                    .col(ColumnDef::new(Reply::ReplyWriter).string().not_null())
                    .col(ColumnDef::new(Reply::ReplyContent).text().not_null())
                    .col(
                        ColumnDef::new(Reply::PublishedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reply::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reply_blog_id")
                    .table(Reply::Table)
                    .col(Reply::BlogId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reply::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reply {
    Table,
    ReplyId,
    BlogId,
    ReplyWriter,
    ReplyContent,
    PublishedAt,
    UpdatedAt,
}
