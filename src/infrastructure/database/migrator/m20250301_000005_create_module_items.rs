//! Create module_items table (module -> content join rows)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModuleItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModuleItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ModuleItems::ModuleId).string().not_null())
                    .col(ColumnDef::new(ModuleItems::ContentId).string().not_null())
                    .col(
                        ColumnDef::new(ModuleItems::Kind)
                            .string()
                            .not_null()
                            .default("Lesson"),
                    )
                    .col(
                        ColumnDef::new(ModuleItems::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ModuleItems::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ModuleItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_module_items_module_position")
                    .table(ModuleItems::Table)
                    .col(ModuleItems::ModuleId)
                    .col(ModuleItems::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModuleItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ModuleItems {
    Table,
    Id,
    ModuleId,
    ContentId,
    Kind,
    Position,
    IsPublished,
    CreatedAt,
}
