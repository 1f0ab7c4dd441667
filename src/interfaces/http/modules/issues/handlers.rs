//! Issue API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, HeaderMap, HeaderName, StatusCode},
    Json,
};

use super::dto::{IssueDto, IssueRequest, ListIssuesParams};
use crate::application::IssueService;
use crate::domain::IssueStatus;
use crate::interfaces::http::common::{JsonBody, Paging};
use crate::interfaces::http::error::{ApiResult, ErrorBody};

/// Issue handler state
#[derive(Clone)]
pub struct IssueHandlerState {
    pub issue_service: Arc<IssueService>,
    pub paging: Paging,
}

#[utoipa::path(
    get,
    path = "/issues",
    tag = "Issues",
    params(ListIssuesParams),
    responses(
        (status = 200, description = "Issues, oldest first", body = Vec<IssueDto>,
            headers(
                ("Pagination-Page" = u64),
                ("Pagination-PageSize" = u64),
                ("Pagination-Total" = u64),
                ("Link" = String)
            ))
    )
)]
pub async fn list_issues(
    State(state): State<IssueHandlerState>,
    Query(params): Query<ListIssuesParams>,
) -> ApiResult<(HeaderMap, Json<Vec<IssueDto>>)> {
    let page = state
        .paging
        .request(params.page.as_deref(), params.page_size.as_deref());
    let status = params.status.as_deref().filter(|s| !s.is_empty());

    let result = state.issue_service.list_issues(status, page).await?;

    // Only a recognised status is echoed into the links
    let filters: Vec<(&str, &str)> = status
        .and_then(IssueStatus::parse)
        .map(|s| ("status", s.as_str()))
        .into_iter()
        .collect();
    let headers = state.paging.headers("/issues", &filters, &result);

    let items = result.items.into_iter().map(IssueDto::from).collect();
    Ok((headers, Json(items)))
}

#[utoipa::path(
    get,
    path = "/issues/{id}",
    tag = "Issues",
    params(("id" = String, Path, description = "Issue ID")),
    responses(
        (status = 200, description = "Issue details", body = IssueDto),
        (status = 404, description = "No issue found with ID <id>", body = String, content_type = "text/plain")
    )
)]
pub async fn get_issue(
    State(state): State<IssueHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<IssueDto>> {
    let issue = state.issue_service.get_issue(&id).await?;
    Ok(Json(IssueDto::from(issue)))
}

#[utoipa::path(
    post,
    path = "/issues",
    tag = "Issues",
    request_body = IssueRequest,
    responses(
        (status = 201, description = "Issue reported", body = IssueDto,
            headers(("Location" = String, description = "URL of the new issue"))),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn create_issue(
    State(state): State<IssueHandlerState>,
    JsonBody(request): JsonBody<IssueRequest>,
) -> ApiResult<(StatusCode, [(HeaderName, String); 1], Json<IssueDto>)> {
    let issue = state.issue_service.create_issue(request.into()).await?;
    let location = state.paging.url(&format!("/issues/{}", issue.id));
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(IssueDto::from(issue))))
}

/// Partial update of `status`, `description`, `imageUrl`, `latitude`,
/// `longitude`, `tags` and `updatedBy`.
#[utoipa::path(
    patch,
    path = "/issues/{id}",
    tag = "Issues",
    params(("id" = String, Path, description = "Issue ID")),
    request_body = IssueRequest,
    responses(
        (status = 200, description = "Issue updated", body = IssueDto),
        (status = 404, description = "No issue found with ID <id>", body = String, content_type = "text/plain"),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn update_issue(
    State(state): State<IssueHandlerState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<IssueRequest>,
) -> ApiResult<Json<IssueDto>> {
    let issue = state.issue_service.update_issue(&id, request.into()).await?;
    Ok(Json(IssueDto::from(issue)))
}

#[utoipa::path(
    put,
    path = "/issues/{id}",
    tag = "Issues",
    params(("id" = String, Path, description = "Issue ID")),
    request_body = IssueRequest,
    responses(
        (status = 200, description = "Issue replaced", body = IssueDto),
        (status = 404, description = "No issue found with ID <id>", body = String, content_type = "text/plain"),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn replace_issue(
    State(state): State<IssueHandlerState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<IssueRequest>,
) -> ApiResult<Json<IssueDto>> {
    let issue = state.issue_service.replace_issue(&id, request.into()).await?;
    Ok(Json(IssueDto::from(issue)))
}

#[utoipa::path(
    delete,
    path = "/issues/{id}",
    tag = "Issues",
    params(("id" = String, Path, description = "Issue ID")),
    responses(
        (status = 204, description = "Issue deleted"),
        (status = 404, description = "No issue found with ID <id>", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_issue(
    State(state): State<IssueHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.issue_service.delete_issue(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
