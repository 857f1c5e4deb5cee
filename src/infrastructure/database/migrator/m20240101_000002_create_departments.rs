//! Create Department table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_instructors::Instructor;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Department::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Department::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Department::Budget)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Department::StartDate).date().not_null())
                    .col(ColumnDef::new(Department::InstructorId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_instructor")
                            .from(Department::Table, Department::InstructorId)
                            .to(Instructor::Table, Instructor::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Department::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "Department"]
pub enum Department {
    Table,
    Id,
    Name,
    Budget,
    StartDate,
    InstructorId,
}
