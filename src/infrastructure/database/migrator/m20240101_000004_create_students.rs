//! Create Student table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Student::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Student::FirstMidName).string_len(50).not_null())
                    .col(ColumnDef::new(Student::EnrollmentDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        // The list page sorts by either column
        manager
            .create_index(
                Index::create()
                    .name("idx_student_last_name")
                    .table(Student::Table)
                    .col(Student::LastName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_enrollment_date")
                    .table(Student::Table)
                    .col(Student::EnrollmentDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "Student"]
pub enum Student {
    Table,
    Id,
    LastName,
    FirstMidName,
    EnrollmentDate,
}
