//! User API handlers
//!
//! Thin wrappers over `UserService`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, HeaderMap, HeaderName, StatusCode},
    Json,
};

use super::dto::{UserDto, UserListItemDto, UserRequest};
use crate::application::UserService;
use crate::interfaces::http::common::{JsonBody, PageQuery, Paging};
use crate::interfaces::http::error::{ApiResult, ErrorBody};
use crate::interfaces::http::modules::issues::IssueDto;

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
    pub paging: Paging,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(PageQuery),
    responses(
        (status = 200, description = "Users sorted by last name, with their issue count", body = Vec<UserListItemDto>,
            headers(
                ("Pagination-Page" = u64),
                ("Pagination-PageSize" = u64),
                ("Pagination-Total" = u64),
                ("Link" = String)
            ))
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<(HeaderMap, Json<Vec<UserListItemDto>>)> {
    let page = state
        .paging
        .request(query.page.as_deref(), query.page_size.as_deref());

    let result = state.user_service.list_users(page).await?;
    let headers = state.paging.headers("/users", &[], &result);

    let items = result.items.into_iter().map(UserListItemDto::from).collect();
    Ok((headers, Json(items)))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 404, description = "No user found with ID <id>", body = String, content_type = "text/plain")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserDto>> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    get,
    path = "/users/{id}/createdIssues",
    tag = "Users",
    params(("id" = String, Path, description = "User ID"), PageQuery),
    responses(
        (status = 200, description = "Issues reported by the user, oldest first", body = Vec<IssueDto>),
        (status = 404, description = "No user found with ID <id>", body = String, content_type = "text/plain")
    )
)]
pub async fn list_created_issues(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<(HeaderMap, Json<Vec<IssueDto>>)> {
    let page = state
        .paging
        .request(query.page.as_deref(), query.page_size.as_deref());

    let result = state.user_service.created_issues(&id, page).await?;
    let path = format!("/users/{}/createdIssues", id);
    let headers = state.paging.headers(&path, &[], &result);

    let items = result.items.into_iter().map(IssueDto::from).collect();
    Ok((headers, Json(items)))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> ApiResult<(StatusCode, [(HeaderName, String); 1], Json<UserDto>)> {
    let user = state.user_service.create_user(request.into()).await?;
    let location = state.paging.url(&format!("/users/{}", user.id));
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(UserDto::from(user))))
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 404, description = "No user found with ID <id>", body = String, content_type = "text/plain"),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UserRequest>,
) -> ApiResult<Json<UserDto>> {
    let user = state.user_service.update_user(&id, request.into()).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User replaced", body = UserDto),
        (status = 404, description = "No user found with ID <id>", body = String, content_type = "text/plain"),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn replace_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UserRequest>,
) -> ApiResult<Json<UserDto>> {
    let user = state.user_service.replace_user(&id, request.into()).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No user found with ID <id>", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
