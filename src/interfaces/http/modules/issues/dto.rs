//! Issue DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CreateIssueDto, Issue, NumericInput, ReplaceIssueDto, TagsInput, UpdateIssueDto,
};

/// Issue API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueDto {
    pub id: String,
    pub title: String,
    /// `new`, `inProgress`, `canceled` or `completed`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: Vec<String>,
    /// ID of the reporting user
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    pub revision: i32,
}

impl From<Issue> for IssueDto {
    fn from(i: Issue) -> Self {
        Self {
            id: i.id,
            title: i.title,
            status: i.status.as_str().to_string(),
            description: i.description,
            image_url: i.image_url,
            latitude: i.latitude,
            longitude: i.longitude,
            tags: i.tags,
            created_by: i.created_by,
            created_at: i.created_at,
            updated_at: i.updated_at,
            updated_by: i.updated_by,
            revision: i.revision,
        }
    }
}

/// Issue body for POST, PUT and PATCH. Which fields are used depends on
/// the verb; anything else in the body is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    #[schema(example = "Broken lamp", max_length = 20)]
    pub title: Option<String>,
    #[schema(example = "new")]
    pub status: Option<String>,
    #[schema(max_length = 1000)]
    pub description: Option<String>,
    #[schema(max_length = 500)]
    pub image_url: Option<String>,
    /// Number or numeric string
    #[schema(value_type = Option<f64>, example = 46.78)]
    pub latitude: Option<NumericInput>,
    /// Number or numeric string
    #[schema(value_type = Option<f64>, example = 6.64)]
    pub longitude: Option<NumericInput>,
    /// List of tags or a single tag
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<TagsInput>,
    /// Reporting user; only read on create
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl From<IssueRequest> for CreateIssueDto {
    fn from(r: IssueRequest) -> Self {
        Self {
            title: r.title,
            status: r.status,
            description: r.description,
            image_url: r.image_url,
            latitude: r.latitude,
            longitude: r.longitude,
            tags: r.tags,
            created_by: r.created_by,
            updated_by: r.updated_by,
        }
    }
}

impl From<IssueRequest> for ReplaceIssueDto {
    fn from(r: IssueRequest) -> Self {
        Self {
            title: r.title,
            status: r.status,
            description: r.description,
            image_url: r.image_url,
            latitude: r.latitude,
            longitude: r.longitude,
            tags: r.tags,
            updated_by: r.updated_by,
        }
    }
}

/// Only the whitelisted PATCH fields survive the conversion.
impl From<IssueRequest> for UpdateIssueDto {
    fn from(r: IssueRequest) -> Self {
        Self {
            status: r.status,
            description: r.description,
            image_url: r.image_url,
            latitude: r.latitude,
            longitude: r.longitude,
            tags: r.tags,
            updated_by: r.updated_by,
        }
    }
}

/// List issues query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListIssuesParams {
    /// Only issues with this status
    pub status: Option<String>,
    /// Page number, starting at 1
    #[param(value_type = Option<u64>, minimum = 1)]
    pub page: Option<String>,
    /// Number of records per page (1 to 100)
    #[param(value_type = Option<u64>, minimum = 1, maximum = 100)]
    pub page_size: Option<String>,
}
