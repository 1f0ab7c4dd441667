use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::user_repository::db_err;
use crate::domain::{DomainError, DomainResult, GetIssuesDto, Issue, IssueRepository, IssueStatus};
use crate::infrastructure::database::entities::issue;
use crate::shared::{page_offset, PaginatedResult};

pub struct SeaOrmIssueRepository {
    db: DatabaseConnection,
}

impl SeaOrmIssueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// One row of the per-creator aggregation.
#[derive(Debug, FromQueryResult)]
struct CreatorCount {
    created_by: String,
    issues_count: i64,
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: issue::IssueStatus) -> IssueStatus {
    match status {
        issue::IssueStatus::New => IssueStatus::New,
        issue::IssueStatus::InProgress => IssueStatus::InProgress,
        issue::IssueStatus::Canceled => IssueStatus::Canceled,
        issue::IssueStatus::Completed => IssueStatus::Completed,
    }
}

fn domain_status_to_entity(status: IssueStatus) -> issue::IssueStatus {
    match status {
        IssueStatus::New => issue::IssueStatus::New,
        IssueStatus::InProgress => issue::IssueStatus::InProgress,
        IssueStatus::Canceled => issue::IssueStatus::Canceled,
        IssueStatus::Completed => issue::IssueStatus::Completed,
    }
}

fn issue_model_to_domain(model: issue::Model) -> Issue {
    Issue {
        id: model.id,
        title: model.title,
        status: entity_status_to_domain(model.status),
        description: model.description,
        image_url: model.image_url,
        latitude: model.latitude,
        longitude: model.longitude,
        tags: model.tags.0,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
        updated_by: model.updated_by,
        revision: model.revision,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl IssueRepository for SeaOrmIssueRepository {
    async fn insert(&self, new_issue: Issue) -> DomainResult<Issue> {
        let active = issue::ActiveModel {
            id: Set(new_issue.id),
            title: Set(new_issue.title),
            status: Set(domain_status_to_entity(new_issue.status)),
            description: Set(new_issue.description),
            image_url: Set(new_issue.image_url),
            latitude: Set(new_issue.latitude),
            longitude: Set(new_issue.longitude),
            tags: Set(issue::Tags(new_issue.tags)),
            created_by: Set(new_issue.created_by),
            created_at: Set(new_issue.created_at),
            updated_at: Set(new_issue.updated_at),
            updated_by: Set(new_issue.updated_by),
            revision: Set(new_issue.revision),
        };

        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(issue_model_to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Issue>> {
        let model = issue::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(issue_model_to_domain))
    }

    async fn list(&self, dto: GetIssuesDto) -> DomainResult<PaginatedResult<Issue>> {
        let page = dto.page.max(1);
        let page_size = dto.page_size.max(1);

        let mut query = issue::Entity::find();

        if let Some(status) = dto.status {
            query = query.filter(issue::Column::Status.eq(domain_status_to_entity(status)));
        }

        if let Some(ref created_by) = dto.created_by {
            query = query.filter(issue::Column::CreatedBy.eq(created_by.as_str()));
        }

        // Oldest first so that long-standing issues get handled first
        query = query
            .order_by_asc(issue::Column::CreatedAt)
            .order_by_asc(issue::Column::Id);

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let offset = page_offset(page, page_size);
        let models = query
            .offset(offset)
            .limit(page_size)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<Issue> = models.into_iter().map(issue_model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, page, page_size))
    }

    async fn count_by_creators(&self, user_ids: &[String]) -> DomainResult<HashMap<String, u64>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = issue::Entity::find()
            .select_only()
            .column(issue::Column::CreatedBy)
            .column_as(Expr::col(issue::Column::Id).count(), "issues_count")
            .filter(issue::Column::CreatedBy.is_in(user_ids.iter().map(String::as_str)))
            .group_by(issue::Column::CreatedBy)
            .into_model::<CreatorCount>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.created_by, row.issues_count.max(0) as u64))
            .collect())
    }

    async fn save(&self, existing: Issue) -> DomainResult<Issue> {
        let id = existing.id.clone();
        let active = issue::ActiveModel {
            id: ActiveValue::Unchanged(existing.id),
            title: Set(existing.title),
            status: Set(domain_status_to_entity(existing.status)),
            description: Set(existing.description),
            image_url: Set(existing.image_url),
            latitude: Set(existing.latitude),
            longitude: Set(existing.longitude),
            tags: Set(issue::Tags(existing.tags)),
            created_by: ActiveValue::Unchanged(existing.created_by),
            created_at: ActiveValue::Unchanged(existing.created_at),
            updated_at: Set(existing.updated_at),
            updated_by: Set(existing.updated_by),
            revision: Set(existing.revision + 1),
        };

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::issue_not_found(id),
            e => db_err(e),
        })?;

        Ok(issue_model_to_domain(model))
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = issue::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
