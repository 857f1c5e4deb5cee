//! Create CourseAssignment join table with a (CourseId, InstructorId) key

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_instructors::Instructor;
use super::m20240101_000003_create_courses::Course;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseAssignment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseAssignment::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseAssignment::InstructorId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_course_assignment")
                            .col(CourseAssignment::CourseId)
                            .col(CourseAssignment::InstructorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_assignment_course")
                            .from(CourseAssignment::Table, CourseAssignment::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_assignment_instructor")
                            .from(CourseAssignment::Table, CourseAssignment::InstructorId)
                            .to(Instructor::Table, Instructor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseAssignment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "CourseAssignment"]
pub enum CourseAssignment {
    Table,
    CourseId,
    InstructorId,
}
