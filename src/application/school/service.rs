use std::sync::Arc;

use crate::domain::{DomainResult, EnrollmentDateGroup, RepositoryProvider};

/// Read-only school figures for the About page
pub struct SchoolStatisticsService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SchoolStatisticsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// How many students enrolled on each date, oldest first.
    pub async fn enrollment_date_groups(&self) -> DomainResult<Vec<EnrollmentDateGroup>> {
        self.repos.statistics().enrollment_date_groups().await
    }
}
