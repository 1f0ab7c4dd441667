//! JSON body extractor for Axum
//!
//! `JsonBody<T>` works like `axum::Json<T>` but turns every rejection
//! (bad syntax, wrong content type, wrong shape) into a 400 with a
//! `{"message": ...}` body. Field rules run later, in the services, so
//! that every invalid field is reported at once.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::interfaces::http::error::ApiError;

pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON: {}", rejection.body_text()))
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TestBody {
        #[allow(dead_code)]
        name: Option<String>,
    }

    async fn handler(JsonBody(_body): JsonBody<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let resp = send(json_request(r#"{"name": "Alice"}"#)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let resp = send(json_request("not json")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_shape_returns_400() {
        let resp = send(json_request(r#"{"name": 42}"#)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_returns_400() {
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .body(Body::from(r#"{"name": "Alice"}"#))
            .unwrap();
        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
