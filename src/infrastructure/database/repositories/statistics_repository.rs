//! SeaORM implementation of StatisticsRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder, QuerySelect,
};

use crate::domain::school::{EnrollmentDateGroup, StatisticsRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::db_err;
use crate::infrastructure::database::entities::student;

#[derive(Debug, FromQueryResult)]
struct EnrollmentDateRow {
    enrollment_date: chrono::NaiveDate,
    student_count: i64,
}

pub struct SeaOrmStatisticsRepository {
    db: DatabaseConnection,
}

impl SeaOrmStatisticsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatisticsRepository for SeaOrmStatisticsRepository {
    async fn enrollment_date_groups(&self) -> DomainResult<Vec<EnrollmentDateGroup>> {
        let rows = student::Entity::find()
            .select_only()
            .column(student::Column::EnrollmentDate)
            .column_as(Expr::col(student::Column::Id).count(), "student_count")
            .group_by(student::Column::EnrollmentDate)
            .order_by_asc(student::Column::EnrollmentDate)
            .into_model::<EnrollmentDateRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| EnrollmentDateGroup {
                enrollment_date: row.enrollment_date,
                student_count: row.student_count.max(0) as u64,
            })
            .collect())
    }
}
