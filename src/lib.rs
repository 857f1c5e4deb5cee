//! # Contoso University
//!
//! Student administration service: a searchable, sortable, paged student
//! list with create, edit, details and delete flows, plus enrollment date
//! statistics.
//!
//! ## Architecture
//!
//! - **domain**: records, validation rules and repository traits
//! - **application**: list pipeline and mutation strategies
//! - **infrastructure**: SeaORM entities, migrations, repositories, seed data
//! - **interfaces**: HTTP router, handlers and middleware
//! - **server**: start-up and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, seed_if_empty, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export HTTP router
pub use interfaces::http::{create_router, ApiDoc, AppState};

pub use shared::types::{PageSource, PaginatedList};
