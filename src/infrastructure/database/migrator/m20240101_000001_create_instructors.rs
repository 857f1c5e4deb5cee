//! Create Instructor table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Instructor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instructor::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Instructor::FirstMidName).string_len(50).not_null())
                    .col(ColumnDef::new(Instructor::HireDate).date().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Instructor::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "Instructor"]
pub enum Instructor {
    Table,
    Id,
    LastName,
    FirstMidName,
    HireDate,
}
