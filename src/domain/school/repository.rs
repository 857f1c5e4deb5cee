//! School statistics repository interface

use async_trait::async_trait;

use super::model::EnrollmentDateGroup;
use crate::domain::DomainResult;

#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Student counts grouped by enrollment date, oldest date first.
    async fn enrollment_date_groups(&self) -> DomainResult<Vec<EnrollmentDateGroup>>;
}
