/// Helpers for driving the full router in tests.
use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use crate::backend::ai::{AiError, GenerativeModel, Part};
use crate::backend::domain::models::DEFAULT_MONTHLY_BUDGET;
use crate::backend::storage::csv::test_utils::TestEnvironment;
use crate::backend::{create_router, AppState};

pub const TEST_PASSWORD: &str = "open-sesame";
pub const MULTIPART_BOUNDARY: &str = "finance-os-test-boundary";

/// Model that answers every request with the same text
pub struct CannedModel(pub String);

#[async_trait]
impl GenerativeModel for CannedModel {
    async fn generate(&self, _parts: Vec<Part>) -> Result<String, AiError> {
        Ok(self.0.clone())
    }
}

pub struct TestApp {
    pub env: TestEnvironment,
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    /// App without an AI key
    pub async fn new() -> Result<Self> {
        Self::build(None).await
    }

    /// App whose model always replies with `reply`
    pub async fn with_model_reply(reply: &str) -> Result<Self> {
        Self::build(Some(Arc::new(CannedModel(reply.to_string())))).await
    }

    async fn build(model: Option<Arc<dyn GenerativeModel>>) -> Result<Self> {
        let env = TestEnvironment::new().await?;
        let state = AppState::new(
            env.connection.clone(),
            TEST_PASSWORD,
            DEFAULT_MONTHLY_BUDGET,
            model,
        );
        let router = create_router(state.clone());
        Ok(Self { env, state, router })
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Log in through the API and return the `Cookie` header value to send back
    pub async fn login(&self) -> String {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"password":"{}"}}"#, TEST_PASSWORD)))
            .unwrap();
        let response = self.send(request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        set_cookie.split(';').next().unwrap().to_string()
    }
}

pub fn json_request(method: Method, uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_request(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Single-file multipart upload in the `receipt` field
pub fn receipt_upload_request(uri: &str, cookie: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"receipt\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            file_name, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn read_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
