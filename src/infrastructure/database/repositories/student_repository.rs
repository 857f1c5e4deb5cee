//! SeaORM implementation of StudentRepository

use std::num::NonZeroU64;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Select, SqlErr,
};
use tracing::{info, warn};

use crate::domain::repositories::WriteOutcome;
use crate::domain::school::{Course, EnrollmentRecord, Grade};
use crate::domain::student::{
    Student, StudentDetails, StudentFields, StudentQuery, StudentRepository, StudentSortOrder,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{course, enrollment, student};
use crate::infrastructure::database::{db_err, SelectPageSource};
use crate::shared::PaginatedList;

// ── Conversion helpers ──────────────────────────────────────────

fn student_model_to_domain(model: student::Model) -> Student {
    Student {
        id: model.id,
        last_name: model.last_name,
        first_mid_name: model.first_mid_name,
        enrollment_date: model.enrollment_date,
    }
}

fn course_model_to_domain(model: course::Model) -> Course {
    Course {
        id: model.id,
        title: model.title,
        credits: model.credits,
        department_id: model.department_id,
    }
}

fn grade_to_domain(grade: enrollment::Grade) -> Grade {
    match grade {
        enrollment::Grade::A => Grade::A,
        enrollment::Grade::B => Grade::B,
        enrollment::Grade::C => Grade::C,
        enrollment::Grade::D => Grade::D,
        enrollment::Grade::F => Grade::F,
    }
}

/// Active model carrying only the editable columns; the key stays unset.
fn fields_to_active_model(fields: StudentFields) -> student::ActiveModel {
    student::ActiveModel {
        last_name: Set(fields.last_name),
        first_mid_name: Set(fields.first_mid_name),
        enrollment_date: Set(fields.enrollment_date),
        ..Default::default()
    }
}

/// Constraint violations become a `Conflict` outcome; anything else is a
/// storage failure.
fn write_failure(e: DbErr) -> DomainResult<WriteOutcome> {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(reason))
        | Some(SqlErr::ForeignKeyConstraintViolation(reason)) => {
            Ok(WriteOutcome::Conflict(reason))
        }
        _ => Err(db_err(e)),
    }
}

/// `%term%` with `\`, `%` and `_` escaped, so the term matches literally.
fn contains_pattern(term: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

/// Search, then sort. Ties are broken by id so pages never overlap.
fn filtered_select(query: &StudentQuery) -> Select<student::Entity> {
    let mut select = student::Entity::find();

    if let Some(term) = query.search_term() {
        select = select.filter(
            Condition::any()
                .add(
                    Expr::col((student::Entity, student::Column::LastName))
                        .like(contains_pattern(term)),
                )
                .add(
                    Expr::col((student::Entity, student::Column::FirstMidName))
                        .like(contains_pattern(term)),
                ),
        );
    }

    let select = match query.sort {
        StudentSortOrder::NameAsc => select.order_by_asc(student::Column::LastName),
        StudentSortOrder::NameDesc => select.order_by_desc(student::Column::LastName),
        StudentSortOrder::DateAsc => select.order_by_asc(student::Column::EnrollmentDate),
        StudentSortOrder::DateDesc => select.order_by_desc(student::Column::EnrollmentDate),
    };

    select.order_by_asc(student::Column::Id)
}

// ── Repository implementation ───────────────────────────────────

pub struct SeaOrmStudentRepository {
    db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn list_page(
        &self,
        query: &StudentQuery,
        requested_page: Option<i64>,
        page_size: NonZeroU64,
    ) -> DomainResult<PaginatedList<Student>> {
        let source =
            SelectPageSource::new(&self.db, filtered_select(query), student_model_to_domain);
        PaginatedList::create(&source, requested_page, page_size).await
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Student>> {
        let model = student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(student_model_to_domain))
    }

    async fn find_with_enrollments(&self, id: i32) -> DomainResult<Option<StudentDetails>> {
        let Some(model) = student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let rows = enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.eq(id))
            .find_also_related(course::Entity)
            .order_by_asc(enrollment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let enrollments = rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                let course = course?;
                Some(EnrollmentRecord {
                    id: enrollment.id,
                    course: course_model_to_domain(course),
                    grade: enrollment.grade.map(grade_to_domain),
                })
            })
            .collect();

        Ok(Some(StudentDetails {
            student: student_model_to_domain(model),
            enrollments,
        }))
    }

    async fn create(&self, fields: StudentFields) -> DomainResult<Student> {
        let model = fields_to_active_model(fields)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        info!(student_id = model.id, "Student created");
        Ok(student_model_to_domain(model))
    }

    async fn update(&self, id: i32, fields: StudentFields) -> DomainResult<WriteOutcome> {
        let result = student::Entity::update_many()
            .set(fields_to_active_model(fields))
            .filter(student::Column::Id.eq(id))
            .exec(&self.db)
            .await;

        match result {
            Ok(res) if res.rows_affected == 0 => Ok(WriteOutcome::NotFound),
            Ok(_) => Ok(WriteOutcome::Applied),
            Err(e) => {
                warn!(student_id = id, error = %e, "Student update rejected");
                write_failure(e)
            }
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<WriteOutcome> {
        let result = student::Entity::delete_by_id(id).exec(&self.db).await;

        match result {
            Ok(res) if res.rows_affected == 0 => Ok(WriteOutcome::NotFound),
            Ok(_) => Ok(WriteOutcome::Applied),
            Err(e) => {
                warn!(student_id = id, error = %e, "Student delete rejected");
                write_failure(e)
            }
        }
    }
}
