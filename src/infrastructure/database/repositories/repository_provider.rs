//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{IssueRepository, RepositoryProvider, UserRepository};

use super::issue_repository::SeaOrmIssueRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().find_by_id(&id).await?;
/// let issues = repos.issues().list(query).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    issues: SeaOrmIssueRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            issues: SeaOrmIssueRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn issues(&self) -> &dyn IssueRepository {
        &self.issues
    }
}
