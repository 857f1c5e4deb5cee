//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `WriteOutcome`: tagged result of a write issued without a prior read
//! - `DomainResult`: standard result type for domain operations

use super::school::StatisticsRepository;
use super::student::StudentRepository;
use crate::shared::errors::DomainError;

#[cfg(test)]
pub(crate) mod testing;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// What a keyed update or delete did to the store.
///
/// Writes issued without reading the row first can only learn about a
/// missing row or a violated constraint from the write itself; callers
/// branch on this instead of inspecting driver errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// No row matched the key
    NotFound,
    /// A constraint rejected the write
    Conflict(String),
}

impl WriteOutcome {
    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::NotFound => "not_found",
            Self::Conflict(_) => "conflict",
        }
    }
}

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let student = repos.students().find_by_id(1).await?;
///     let groups = repos.statistics().enrollment_date_groups().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn students(&self) -> &dyn StudentRepository;
    fn statistics(&self) -> &dyn StatisticsRepository;
}
