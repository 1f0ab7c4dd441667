//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CreateUserDto, UpdateUserDto, User, UserSummary};

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// `citizen` or `manager`
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            role: u.role.as_str().to_string(),
            created_at: u.created_at,
            revision: u.revision,
        }
    }
}

/// A user in the listing, with the number of issues they reported.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListItemDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub issues_count: u64,
}

impl From<UserSummary> for UserListItemDto {
    fn from(s: UserSummary) -> Self {
        Self {
            user: UserDto::from(s.user),
            issues_count: s.issues_count,
        }
    }
}

/// Create (POST) or replace (PUT) request. Other body fields are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[schema(example = "Ada", min_length = 2, max_length = 20)]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace", min_length = 2, max_length = 20)]
    pub last_name: Option<String>,
    #[schema(example = "citizen")]
    pub role: Option<String>,
}

impl From<UserRequest> for CreateUserDto {
    fn from(r: UserRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            role: r.role,
        }
    }
}

impl From<UserRequest> for UpdateUserDto {
    fn from(r: UserRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            role: r.role,
        }
    }
}
