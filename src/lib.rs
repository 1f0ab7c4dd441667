//! # Civic Issues Service
//!
//! REST API backing a civic issue reporting application: citizens report
//! located problems ("issues"), managers track their status.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Records, write drafts, field validation and repository traits
//! - **application**: `UserService` and `IssueService` use cases
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Service lifecycle and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    connect_in_memory, init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::{create_api_router, Paging};
