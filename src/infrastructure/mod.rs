//! Infrastructure layer - external concerns

pub mod database;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{connect_in_memory, init_database, run_migrations, DatabaseConfig};
