//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod issue_repository;
pub mod repository_provider;
pub mod user_repository;

pub use issue_repository::SeaOrmIssueRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;
