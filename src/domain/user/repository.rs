use async_trait::async_trait;

use super::User;
use super::GetUsersDto;
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_name(&self, first_name: &str, last_name: &str) -> DomainResult<Option<User>>;
    /// Sorted by last name, then first name.
    async fn list(&self, query: GetUsersDto) -> DomainResult<PaginatedResult<User>>;

    /// Persist every field and bump the revision.
    async fn save(&self, user: User) -> DomainResult<User>;
    /// `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> DomainResult<bool>;
}
