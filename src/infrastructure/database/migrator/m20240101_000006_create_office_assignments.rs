//! Create OfficeAssignment table

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
                    .table(OfficeAssignment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OfficeAssignment::InstructorId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OfficeAssignment::Location).string_len(50).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_office_assignment_instructor")
                            .from(OfficeAssignment::Table, OfficeAssignment::InstructorId)
                            .to(Instructor::Table, Instructor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OfficeAssignment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "OfficeAssignment"]
pub enum OfficeAssignment {
    Table,
    InstructorId,
    Location,
}
