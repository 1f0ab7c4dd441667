//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{IssueService, UserService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::SeaOrmRepositoryProvider;
use crate::interfaces::http::common::Paging;
use crate::interfaces::http::error::ErrorBody;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{health, issues, users};

/// Unified state for every route. Each handler extracts its own slice
/// through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
    pub user_service: Arc<UserService>,
    pub issue_service: Arc<IssueService>,
    pub paging: Paging,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    pub fn new(db: DatabaseConnection, paging: Paging) -> Self {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        Self {
            db,
            user_service: Arc::new(UserService::new(repos.clone())),
            issue_service: Arc::new(IssueService::new(repos)),
            paging,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<ApiState> for users::UserHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        users::UserHandlerState {
            user_service: Arc::clone(&s.user_service),
            paging: s.paging.clone(),
        }
    }
}

impl FromRef<ApiState> for issues::IssueHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        issues::IssueHandlerState {
            issue_service: Arc::clone(&s.issue_service),
            paging: s.paging.clone(),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Issues
        issues::list_issues,
        issues::get_issue,
        issues::create_issue,
        issues::update_issue,
        issues::replace_issue,
        issues::delete_issue,
        // Users
        users::list_users,
        users::get_user,
        users::list_created_issues,
        users::create_user,
        users::update_user,
        users::replace_user,
        users::delete_user,
    ),
    components(
        schemas(
            ErrorBody,
            health::HealthResponse,
            health::ComponentHealth,
            issues::IssueDto,
            issues::IssueRequest,
            users::UserDto,
            users::UserListItemDto,
            users::UserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service liveness and database reachability"),
        (name = "Issues", description = "Reported civic problems: listing, reporting, status tracking"),
        (name = "Users", description = "Citizens and managers, with the issues they reported"),
    ),
    info(
        title = "Civic Issues API",
        version = "1.0.0",
        description = "REST API for reporting and tracking civic issues",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::message("Not Found")))
}

/// Create the API router with all routes
pub fn create_api_router(db: DatabaseConnection, paging: Paging) -> Router {
    router_with_state(ApiState::new(db, paging))
}

pub fn router_with_state(state: ApiState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    let issue_routes = Router::new()
        .route("/", get(issues::list_issues).post(issues::create_issue))
        .route(
            "/{id}",
            get(issues::get_issue)
                .patch(issues::update_issue)
                .put(issues::replace_issue)
                .delete(issues::delete_issue),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .put(users::replace_user)
                .delete(users::delete_user),
        )
        .route("/{id}/createdIssues", get(users::list_created_issues));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Resources
        .nest("/issues", issue_routes)
        .nest("/users", user_routes)
        .fallback(not_found)
        .with_state(state)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
