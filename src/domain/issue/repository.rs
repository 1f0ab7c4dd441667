use std::collections::HashMap;

use async_trait::async_trait;

use super::{GetIssuesDto, Issue};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait IssueRepository: Send + Sync {
    async fn insert(&self, issue: Issue) -> DomainResult<Issue>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Issue>>;
    /// Oldest first.
    async fn list(&self, query: GetIssuesDto) -> DomainResult<PaginatedResult<Issue>>;
    /// Number of issues created by each of `user_ids`. Users without issues
    /// are absent from the map.
    async fn count_by_creators(&self, user_ids: &[String]) -> DomainResult<HashMap<String, u64>>;

    /// Persist every field and bump the revision.
    async fn save(&self, issue: Issue) -> DomainResult<Issue>;
    /// `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> DomainResult<bool>;
}
