//! Create Course table

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_departments::Department;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    // Course numbers are assigned by hand, not generated
                    .col(ColumnDef::new(Course::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Course::Title).string_len(50).not_null())
                    .col(ColumnDef::new(Course::Credits).integer().not_null().default(0))
                    .col(ColumnDef::new(Course::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_department")
                            .from(Course::Table, Course::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "Course"]
pub enum Course {
    Table,
    Id,
    Title,
    Credits,
    DepartmentId,
}
