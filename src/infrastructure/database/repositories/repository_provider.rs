//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::school::StatisticsRepository;
use crate::domain::student::StudentRepository;

use super::statistics_repository::SeaOrmStatisticsRepository;
use super::student_repository::SeaOrmStudentRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let student = repos.students().find_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    students: SeaOrmStudentRepository,
    statistics: SeaOrmStatisticsRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            students: SeaOrmStudentRepository::new(db.clone()),
            statistics: SeaOrmStatisticsRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn students(&self) -> &dyn StudentRepository {
        &self.students
    }

    fn statistics(&self) -> &dyn StatisticsRepository {
        &self.statistics
    }
}
