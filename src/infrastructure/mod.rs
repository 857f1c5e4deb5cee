//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, seed_if_empty, DatabaseConfig};
