//! Repository access for the domain layer

use super::issue::IssueRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_id(&id).await?;
///     let counts = repos.issues().count_by_creators(&[id]).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn issues(&self) -> &dyn IssueRepository;
}
