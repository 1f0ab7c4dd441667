//! Issue service
//!
//! Creation, listing and updates of reported issues. Reference fields
//! (`createdBy`, `updatedBy`) are checked against the user store on write.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::input::resolve_numeric;
use crate::domain::{
    CreateIssueDto, DomainError, DomainResult, FieldError, GetIssuesDto, Issue, IssueDraft,
    IssueStatus, RepositoryProvider, ReplaceIssueDto, UpdateIssueDto, ValidationFailure,
};
use crate::shared::{is_valid_id, PageRequest, PaginatedResult};

pub struct IssueService {
    repos: Arc<dyn RepositoryProvider>,
}

impl IssueService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// One page of issues, oldest first, optionally limited to one status.
    /// A status nobody can have yields an empty page.
    pub async fn list_issues(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Issue>> {
        let status = match status {
            None => None,
            Some(raw) => match IssueStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    debug!(status = raw, "Unknown status filter, nothing can match");
                    return Ok(PaginatedResult::empty(page.page, page.page_size));
                }
            },
        };

        self.repos
            .issues()
            .list(GetIssuesDto {
                status,
                created_by: None,
                page: page.page,
                page_size: page.page_size,
            })
            .await
    }

    pub async fn get_issue(&self, id: &str) -> DomainResult<Issue> {
        if !is_valid_id(id) {
            return Err(DomainError::issue_not_found(id));
        }

        self.repos
            .issues()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::issue_not_found(id))
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn create_issue(&self, dto: CreateIssueDto) -> DomainResult<Issue> {
        let mut failure = ValidationFailure::new("Issue");

        let draft = IssueDraft {
            title: dto.title,
            status: Some(dto.status.unwrap_or_else(|| IssueStatus::default().to_string())),
            description: dto.description,
            image_url: dto.image_url,
            latitude: resolve_numeric(dto.latitude.as_ref(), "latitude", &mut failure),
            longitude: resolve_numeric(dto.longitude.as_ref(), "longitude", &mut failure),
            tags: dto.tags.map(|t| t.into_vec()).unwrap_or_default(),
            created_by: dto.created_by,
            updated_by: dto.updated_by,
        };

        self.check_user_ref("createdBy", draft.created_by.as_deref(), &mut failure)
            .await?;
        self.check_user_ref("updatedBy", draft.updated_by.as_deref(), &mut failure)
            .await?;

        let fields = draft.validate_into(failure)?;
        let issue = self.repos.issues().insert(Issue::new(fields)).await?;

        info!(
            issue_id = %issue.id,
            created_by = %issue.created_by,
            status = %issue.status,
            "Issue reported: \"{}\"", issue.title
        );
        Ok(issue)
    }

    /// Partial update. The title and the creator cannot be changed here.
    pub async fn update_issue(&self, id: &str, dto: UpdateIssueDto) -> DomainResult<Issue> {
        let mut issue = self.get_issue(id).await?;
        let mut failure = ValidationFailure::new("Issue");

        let mut draft = IssueDraft::from(&issue);
        if dto.status.is_some() {
            draft.status = dto.status;
        }
        if dto.description.is_some() {
            draft.description = dto.description;
        }
        if dto.image_url.is_some() {
            draft.image_url = dto.image_url;
        }
        if let Some(latitude) = resolve_numeric(dto.latitude.as_ref(), "latitude", &mut failure) {
            draft.latitude = Some(latitude);
        }
        if let Some(longitude) = resolve_numeric(dto.longitude.as_ref(), "longitude", &mut failure) {
            draft.longitude = Some(longitude);
        }
        if let Some(tags) = dto.tags {
            draft.tags = tags.into_vec();
        }
        if dto.updated_by.is_some() {
            self.check_user_ref("updatedBy", dto.updated_by.as_deref(), &mut failure)
                .await?;
            draft.updated_by = dto.updated_by;
        }

        self.save(&mut issue, draft, failure).await?;
        info!(issue_id = %issue.id, status = %issue.status, "Issue updated");
        Ok(issue)
    }

    /// Full replace of every writable field. The creator is kept.
    pub async fn replace_issue(&self, id: &str, dto: ReplaceIssueDto) -> DomainResult<Issue> {
        let mut issue = self.get_issue(id).await?;
        let mut failure = ValidationFailure::new("Issue");

        let draft = IssueDraft {
            title: dto.title,
            status: dto.status,
            description: dto.description,
            image_url: dto.image_url,
            latitude: resolve_numeric(dto.latitude.as_ref(), "latitude", &mut failure),
            longitude: resolve_numeric(dto.longitude.as_ref(), "longitude", &mut failure),
            tags: dto.tags.map(|t| t.into_vec()).unwrap_or_default(),
            created_by: Some(issue.created_by.clone()),
            updated_by: dto.updated_by,
        };

        if draft.updated_by != issue.updated_by {
            self.check_user_ref("updatedBy", draft.updated_by.as_deref(), &mut failure)
                .await?;
        }

        self.save(&mut issue, draft, failure).await?;
        info!(issue_id = %issue.id, status = %issue.status, "Issue replaced");
        Ok(issue)
    }

    pub async fn delete_issue(&self, id: &str) -> DomainResult<()> {
        let issue = self.get_issue(id).await?;

        if !self.repos.issues().delete(&issue.id).await? {
            return Err(DomainError::issue_not_found(id));
        }

        info!(issue_id = %issue.id, "Issue deleted");
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn save(
        &self,
        issue: &mut Issue,
        draft: IssueDraft,
        failure: ValidationFailure,
    ) -> DomainResult<()> {
        let fields = draft.validate_into(failure)?;
        issue.apply(fields);
        *issue = self.repos.issues().save(issue.clone()).await?;
        Ok(())
    }

    /// Record a `ref` error when `user_id` does not name an existing user.
    /// Missing or blank values are left to the field rules.
    async fn check_user_ref(
        &self,
        path: &str,
        user_id: Option<&str>,
        failure: &mut ValidationFailure,
    ) -> DomainResult<()> {
        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            return Ok(());
        };

        let exists = is_valid_id(user_id) && self.repos.users().find_by_id(user_id).await?.is_some();
        if !exists {
            failure.push(FieldError::unknown_user(path, user_id));
        }
        Ok(())
    }
}
