//! End-to-end tests driving the router over an in-memory database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use civic_issues::{connect_in_memory, create_api_router, Paging};

const BASE_URL: &str = "http://civic.test";

async fn app() -> Router {
    let db = connect_in_memory().await.unwrap();
    create_api_router(db, Paging::new(BASE_URL, 100, 100))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body(resp: Response<Body>) -> Value {
    serde_json::from_str(&text(resp).await).unwrap()
}

async fn create_user(app: &Router, first: &str, last: &str, role: &str) -> Value {
    let resp = send(
        app,
        "POST",
        "/users",
        Some(json!({ "firstName": first, "lastName": last, "role": role })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
}

async fn create_issue(app: &Router, created_by: &str, title: &str) -> Value {
    let resp = send(
        app,
        "POST",
        "/issues",
        Some(json!({
            "title": title,
            "description": "Street lamp is out",
            "latitude": "46.78",
            "longitude": 6.64,
            "tags": "lighting",
            "createdBy": created_by,
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
}

#[tokio::test]
async fn create_then_fetch_issue() {
    let app = app().await;
    let user = create_user(&app, "Ada", "Lovelace", "citizen").await;
    let user_id = user["id"].as_str().unwrap();

    let resp = send(
        &app,
        "POST",
        "/issues",
        Some(json!({
            "title": "Broken lamp",
            "latitude": "-10",
            "longitude": 10,
            "tags": ["lighting", "night"],
            "createdBy": user_id,
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();
    let created = json_body(resp).await;
    let id = created["id"].as_str().unwrap();

    assert_eq!(location, format!("{}/issues/{}", BASE_URL, id));
    assert_eq!(created["status"], "new");
    assert_eq!(created["latitude"], -10.0);
    assert_eq!(created["createdBy"], user_id);
    assert_eq!(created["revision"], 0);

    let resp = send(&app, "GET", &format!("/issues/{}", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, created);
}

#[tokio::test]
async fn patch_only_changes_whitelisted_fields() {
    let app = app().await;
    let user = create_user(&app, "Ada", "Lovelace", "citizen").await;
    let issue = create_issue(&app, user["id"].as_str().unwrap(), "Broken lamp").await;
    let id = issue["id"].as_str().unwrap();

    let resp = send(
        &app,
        "PATCH",
        &format!("/issues/{}", id),
        Some(json!({
            "status": "inProgress",
            "title": "Renamed",
            "createdBy": "someone-else",
            "createdAt": "2001-01-01T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json_body(resp).await;

    assert_eq!(updated["status"], "inProgress");
    assert_eq!(updated["title"], "Broken lamp");
    assert_eq!(updated["createdBy"], issue["createdBy"]);
    assert_eq!(updated["createdAt"], issue["createdAt"]);
    assert!(updated["updatedAt"].is_string());
    assert_eq!(updated["revision"], 1);
}

#[tokio::test]
async fn invalid_fields_are_rejected_with_422() {
    let app = app().await;
    let user = create_user(&app, "Ada", "Lovelace", "citizen").await;

    let resp = send(
        &app,
        "POST",
        "/issues",
        Some(json!({
            "title": "Broken lamp",
            "status": "test",
            "latitude": 91,
            "longitude": "east",
            "createdBy": user["id"],
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Issue validation failed");
    assert_eq!(body["errors"]["status"]["kind"], "enum");
    assert_eq!(body["errors"]["latitude"]["kind"], "max");
    assert_eq!(body["errors"]["longitude"]["kind"], "cast");

    let resp = send(
        &app,
        "POST",
        "/issues",
        Some(json!({ "title": "", "latitude": 1, "longitude": 2, "createdBy": user["id"] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["errors"]["title"]["kind"], "required");

    let resp = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "firstName": "A", "lastName": "Lovelace", "role": "admin" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "User validation failed");
    assert_eq!(body["errors"]["firstName"]["kind"], "minlength");
    assert_eq!(body["errors"]["role"]["kind"], "enum");
}

#[tokio::test]
async fn duplicate_user_name_is_a_unique_error() {
    let app = app().await;
    create_user(&app, "Ada", "Lovelace", "citizen").await;

    let resp = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "firstName": "Ada", "lastName": "Lovelace", "role": "manager" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["errors"]["firstName"]["kind"], "unique");
    assert_eq!(body["errors"]["lastName"]["kind"], "unique");
}

#[tokio::test]
async fn unknown_ids_are_plain_text_404() {
    let app = app().await;

    for (uri, message) in [
        ("/issues/not-an-id", "No issue found with ID not-an-id"),
        (
            "/users/6f1c1b0e-8d57-4d5e-a0e1-2b1c8e5f0a11",
            "No user found with ID 6f1c1b0e-8d57-4d5e-a0e1-2b1c8e5f0a11",
        ),
    ] {
        let resp = send(&app, "GET", uri, None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(text(resp).await, message);
    }

    let resp = send(&app, "DELETE", "/issues/not-an-id", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_and_bad_json() {
    let app = app().await;

    let resp = send(&app, "GET", "/nowhere", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await, json!({ "message": "Not Found" }));

    let req = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["message"].is_string());
}

#[tokio::test]
async fn users_are_sorted_by_last_name_with_issue_counts() {
    let app = app().await;
    let turing = create_user(&app, "Alan", "Turing", "citizen").await;
    let hopper = create_user(&app, "Grace", "Hopper", "manager").await;
    let turing_id = turing["id"].as_str().unwrap();
    create_issue(&app, turing_id, "Pothole").await;
    create_issue(&app, turing_id, "Graffiti").await;

    let resp = send(&app, "GET", "/users", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["pagination-total"], "2");
    let users = json_body(resp).await;

    assert_eq!(users[0]["id"], hopper["id"]);
    assert_eq!(users[0]["issuesCount"], 0);
    assert_eq!(users[1]["id"], turing["id"]);
    assert_eq!(users[1]["issuesCount"], 2);

    let resp = send(&app, "GET", &format!("/users/{}/createdIssues", turing_id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let issues = json_body(resp).await;
    assert_eq!(issues.as_array().unwrap().len(), 2);
    assert_eq!(issues[0]["title"], "Pothole");
}

#[tokio::test]
async fn issue_listing_filters_and_paginates() {
    let app = app().await;
    let user = create_user(&app, "Ada", "Lovelace", "citizen").await;
    let user_id = user["id"].as_str().unwrap();

    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        ids.push(create_issue(&app, user_id, title).await["id"].clone());
    }
    send(
        &app,
        "PATCH",
        &format!("/issues/{}", ids[1].as_str().unwrap()),
        Some(json!({ "status": "completed" })),
    )
    .await;

    let resp = send(&app, "GET", "/issues?page=2&pageSize=2", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["pagination-page"], "2");
    assert_eq!(resp.headers()["pagination-pagesize"], "2");
    assert_eq!(resp.headers()["pagination-total"], "3");
    let link = resp.headers()[header::LINK].to_str().unwrap().to_string();
    assert!(link.contains(&format!("<{}/issues?page=1&pageSize=2>; rel=\"prev\"", BASE_URL)));
    assert!(!link.contains("rel=\"next\""));
    let page = json_body(resp).await;
    assert_eq!(page.as_array().unwrap().len(), 1);

    let resp = send(&app, "GET", "/issues?status=completed", None).await;
    assert_eq!(resp.headers()["pagination-total"], "1");
    let completed = json_body(resp).await;
    assert_eq!(completed[0]["id"], ids[1]);

    let resp = send(&app, "GET", "/issues?status=completed&pageSize=1", None).await;
    let link = resp.headers()[header::LINK].to_str().unwrap().to_string();
    assert!(link.contains("/issues?status=completed&page=1&pageSize=1>; rel=\"first\""));

    let resp = send(&app, "GET", "/issues?status=unknown&pageSize=abc", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["pagination-pagesize"], "100");
    assert_eq!(json_body(resp).await, json!([]));

    let resp = send(&app, "GET", "/issues?status=new%26pageSize%3D1%01", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let link = resp.headers()[header::LINK].to_str().unwrap().to_string();
    assert!(!link.contains("status="));
    assert!(link.contains("/issues?page=1&pageSize=100>; rel=\"first\""));
}

#[tokio::test]
async fn pages_far_past_the_end_are_empty() {
    let app = app().await;
    let user = create_user(&app, "Ada", "Lovelace", "citizen").await;
    create_issue(&app, user["id"].as_str().unwrap(), "Pothole").await;

    for uri in [
        "/issues?page=1000000000000000000&pageSize=100",
        "/users?page=100000000000000000&pageSize=100",
        "/issues?page=18446744073709551615",
    ] {
        let resp = send(&app, "GET", uri, None).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        assert_eq!(resp.headers()["pagination-total"], "1");
        assert_eq!(json_body(resp).await, json!([]));
    }
}

#[tokio::test]
async fn delete_returns_204_and_removes_the_record() {
    let app = app().await;
    let user = create_user(&app, "Ada", "Lovelace", "citizen").await;
    let uri = format!("/users/{}", user["id"].as_str().unwrap());

    let resp = send(&app, "DELETE", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_database_ok() {
    let app = app().await;
    let resp = send(&app, "GET", "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}
