use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

use crate::domain::user::draft::duplicate_name;
use crate::domain::{DomainError, DomainResult, GetUsersDto, User, UserRepository, UserRole};
use crate::infrastructure::database::entities::user;
use crate::shared::{page_offset, PaginatedResult};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Citizen => UserRole::Citizen,
        user::UserRole::Manager => UserRole::Manager,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Citizen => user::UserRole::Citizen,
        UserRole::Manager => user::UserRole::Manager,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        revision: model.revision,
    }
}

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// The unique (first name, last name) index surfaces as a validation error.
fn write_err(e: DbErr, user: &User) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Validation(duplicate_name(&user.first_name, &user.last_name))
        }
        _ => db_err(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn insert(&self, new_user: User) -> DomainResult<User> {
        let active = user::ActiveModel {
            id: Set(new_user.id.clone()),
            first_name: Set(new_user.first_name.clone()),
            last_name: Set(new_user.last_name.clone()),
            role: Set(domain_role_to_entity(new_user.role)),
            created_at: Set(new_user.created_at),
            revision: Set(new_user.revision),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, &new_user))?;

        Ok(user_model_to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_name(&self, first_name: &str, last_name: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::FirstName.eq(first_name))
            .filter(user::Column::LastName.eq(last_name))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn list(&self, dto: GetUsersDto) -> DomainResult<PaginatedResult<User>> {
        let page = dto.page.max(1);
        let page_size = dto.page_size.max(1);

        let query = user::Entity::find()
            .order_by_asc(user::Column::LastName)
            .order_by_asc(user::Column::FirstName);

        // Count total
        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        // Paginate
        let offset = page_offset(page, page_size);
        let models = query
            .offset(offset)
            .limit(page_size)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<User> = models.into_iter().map(user_model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, page, page_size))
    }

    async fn save(&self, existing: User) -> DomainResult<User> {
        let active = user::ActiveModel {
            id: ActiveValue::Unchanged(existing.id.clone()),
            first_name: Set(existing.first_name.clone()),
            last_name: Set(existing.last_name.clone()),
            role: Set(domain_role_to_entity(existing.role)),
            created_at: ActiveValue::Unchanged(existing.created_at),
            revision: Set(existing.revision + 1),
        };

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::user_not_found(&existing.id),
            e => write_err(e, &existing),
        })?;

        Ok(user_model_to_domain(model))
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserFields;
    use crate::infrastructure::database::connect_in_memory;

    fn user(first: &str, last: &str, role: UserRole) -> User {
        User::new(UserFields {
            first_name: first.into(),
            last_name: last.into(),
            role,
        })
    }

    async fn repo() -> SeaOrmUserRepository {
        SeaOrmUserRepository::new(connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn insert_then_find() {
        let repo = repo().await;
        let created = repo
            .insert(user("Ada", "Lovelace", UserRole::Manager))
            .await
            .unwrap();

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.first_name, "Ada");
        assert_eq!(found.role, UserRole::Manager);
        assert_eq!(found.revision, 0);

        let by_name = repo.find_by_name("Ada", "Lovelace").await.unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn duplicate_full_name_is_a_validation_error() {
        let repo = repo().await;
        repo.insert(user("Ada", "Lovelace", UserRole::Citizen))
            .await
            .unwrap();

        let err = repo
            .insert(user("Ada", "Lovelace", UserRole::Manager))
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(failure) => {
                assert_eq!(failure.get("firstName").unwrap().kind, "unique");
                assert_eq!(failure.get("lastName").unwrap().kind, "unique");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_sorts_by_last_name_and_paginates() {
        let repo = repo().await;
        for (first, last) in [("Grace", "Hopper"), ("Alan", "Turing"), ("Ada", "Lovelace")] {
            repo.insert(user(first, last, UserRole::Citizen)).await.unwrap();
        }

        let all = repo
            .list(GetUsersDto { page: 1, page_size: 10 })
            .await
            .unwrap();
        let names: Vec<_> = all.items.iter().map(|u| u.last_name.as_str()).collect();
        assert_eq!(names, ["Hopper", "Lovelace", "Turing"]);
        assert_eq!(all.total, 3);

        let second = repo
            .list(GetUsersDto { page: 2, page_size: 2 })
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].last_name, "Turing");
        assert_eq!(second.total_pages, 2);
    }

    #[tokio::test]
    async fn save_bumps_revision() {
        let repo = repo().await;
        let mut created = repo
            .insert(user("Ada", "Lovelace", UserRole::Citizen))
            .await
            .unwrap();

        created.role = UserRole::Manager;
        let saved = repo.save(created).await.unwrap();
        assert_eq!(saved.revision, 1);
        assert_eq!(saved.role, UserRole::Manager);
    }

    #[tokio::test]
    async fn save_of_missing_user_is_not_found() {
        let repo = repo().await;
        let ghost = user("Nobody", "Here", UserRole::Citizen);
        let err = repo.save(ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "user", .. }));
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = repo().await;
        let created = repo
            .insert(user("Ada", "Lovelace", UserRole::Citizen))
            .await
            .unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
    }
}
