//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod repository_provider;
pub mod statistics_repository;
pub mod student_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
