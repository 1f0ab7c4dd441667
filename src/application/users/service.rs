//! User management service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::user::draft::duplicate_name;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GetIssuesDto, GetUsersDto, Issue,
    RepositoryProvider, UpdateUserDto, User, UserDraft, UserFields, UserSummary,
    ValidationFailure,
};
use crate::shared::{is_valid_id, PageRequest, PaginatedResult};

/// User service: orchestrates all user-management use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// One page of users sorted by last name, each with the number of
    /// issues they created.
    pub async fn list_users(&self, page: PageRequest) -> DomainResult<PaginatedResult<UserSummary>> {
        let users = self
            .repos
            .users()
            .list(GetUsersDto {
                page: page.page,
                page_size: page.page_size,
            })
            .await?;

        let ids: Vec<String> = users.items.iter().map(|u| u.id.clone()).collect();
        let counts = self.repos.issues().count_by_creators(&ids).await?;

        Ok(users.map(|user| {
            let issues_count = counts.get(&user.id).copied().unwrap_or(0);
            UserSummary { user, issues_count }
        }))
    }

    /// Get a single user by ID.
    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        if !is_valid_id(id) {
            return Err(DomainError::user_not_found(id));
        }

        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// Issues reported by the user, oldest first.
    pub async fn created_issues(
        &self,
        id: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Issue>> {
        let user = self.get_user(id).await?;

        self.repos
            .issues()
            .list(GetIssuesDto {
                status: None,
                created_by: Some(user.id),
                page: page.page,
                page_size: page.page_size,
            })
            .await
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let draft = UserDraft {
            first_name: dto.first_name,
            last_name: dto.last_name,
            role: dto.role,
        };
        let fields = draft.validate_into(ValidationFailure::new("User"))?;
        self.ensure_unique_name(&fields, None).await?;

        let user = self.repos.users().insert(User::new(fields)).await?;

        info!(user_id = %user.id, role = %user.role, "Created user \"{}\"", user.first_name);
        Ok(user)
    }

    /// Partial update: only fields present in `dto` change.
    pub async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<User> {
        let mut user = self.get_user(id).await?;

        let mut draft = UserDraft::from(&user);
        if dto.first_name.is_some() {
            draft.first_name = dto.first_name;
        }
        if dto.last_name.is_some() {
            draft.last_name = dto.last_name;
        }
        if dto.role.is_some() {
            draft.role = dto.role;
        }

        self.save(&mut user, draft).await?;
        info!(user_id = %user.id, "Updated user \"{}\"", user.first_name);
        Ok(user)
    }

    /// Full replace: every writable field takes the value from `dto`.
    pub async fn replace_user(&self, id: &str, dto: CreateUserDto) -> DomainResult<User> {
        let mut user = self.get_user(id).await?;

        let draft = UserDraft {
            first_name: dto.first_name,
            last_name: dto.last_name,
            role: dto.role,
        };

        self.save(&mut user, draft).await?;
        info!(user_id = %user.id, "Replaced user \"{}\"", user.first_name);
        Ok(user)
    }

    /// Delete a user by ID. Their issues are kept.
    pub async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let user = self.get_user(id).await?;

        if !self.repos.users().delete(&user.id).await? {
            return Err(DomainError::user_not_found(id));
        }

        info!(user_id = %user.id, "Deleted user \"{}\"", user.first_name);
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn save(&self, user: &mut User, draft: UserDraft) -> DomainResult<()> {
        let fields = draft.validate_into(ValidationFailure::new("User"))?;
        self.ensure_unique_name(&fields, Some(&user.id)).await?;

        user.apply(fields);
        *user = self.repos.users().save(user.clone()).await?;
        Ok(())
    }

    async fn ensure_unique_name(&self, fields: &UserFields, except_id: Option<&str>) -> DomainResult<()> {
        let existing = self
            .repos
            .users()
            .find_by_name(&fields.first_name, &fields.last_name)
            .await?;

        match existing {
            Some(other) if Some(other.id.as_str()) != except_id => Err(DomainError::Validation(
                duplicate_name(&fields.first_name, &fields.last_name),
            )),
            _ => Ok(()),
        }
    }
}
