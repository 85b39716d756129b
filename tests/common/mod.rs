#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use tasktrack_api::auth::{generate_jwt, Claims};
use tasktrack_api::config::AppConfig;
use tasktrack_api::database::MemoryStore;
use tasktrack_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// The full router over a fresh in-memory store
pub struct TestApp {
    router: Router,
}

/// A user with a valid bearer token
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::development();
        config.security.jwt_secret = TEST_SECRET.to_string();

        let state = AppState::new(Arc::new(config), Arc::new(MemoryStore::new()));
        Self { router: app(state) }
    }

    pub fn user(&self, name: &str) -> TestUser {
        let id = Uuid::new_v4();
        let token = generate_jwt(&Claims::new(id, name, 1), TEST_SECRET).expect("token");
        TestUser { id, token }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body for {}", status))?
        };
        Ok(TestResponse { status, body })
    }

    pub async fn raw(&self, request: Request<Body>) -> Result<StatusCode> {
        Ok(self.router.clone().oneshot(request).await?.status())
    }

    pub async fn get(&self, user: &TestUser, uri: &str) -> Result<TestResponse> {
        self.send(Method::GET, uri, Some(&user.token), None).await
    }

    pub async fn post(&self, user: &TestUser, uri: &str, body: Value) -> Result<TestResponse> {
        self.send(Method::POST, uri, Some(&user.token), Some(body)).await
    }

    pub async fn put(&self, user: &TestUser, uri: &str, body: Value) -> Result<TestResponse> {
        self.send(Method::PUT, uri, Some(&user.token), Some(body)).await
    }

    pub async fn delete(&self, user: &TestUser, uri: &str) -> Result<TestResponse> {
        self.send(Method::DELETE, uri, Some(&user.token), None).await
    }

    /// Creates a project and returns its id
    pub async fn create_project(&self, user: &TestUser, name: &str) -> Result<String> {
        let res = self
            .post(user, "/api/projects", serde_json::json!({ "name": name }))
            .await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "create project failed: {}", res.body);
        id_of(res.data())
    }

    /// Creates a task under `project_id` and returns its id
    pub async fn create_task(&self, user: &TestUser, project_id: &str, title: &str) -> Result<String> {
        let res = self
            .post(
                user,
                &format!("/api/projects/{}/tasks", project_id),
                serde_json::json!({ "title": title }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "create task failed: {}", res.body);
        id_of(res.data())
    }
}

pub fn id_of(value: &Value) -> Result<String> {
    value["id"]
        .as_str()
        .map(str::to_string)
        .context("response has no id")
}
