use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_authn::AuthConfig;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{
    config::AppConfig,
    http::{AppState, build_router},
};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_guard(true).await
    }

    pub async fn without_auth() -> Self {
        Self::with_guard(false).await
    }

    async fn with_guard(auth_required: bool) -> Self {
        let pool = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        let config = AppConfig {
            auth: AuthConfig::new("router-test-secret"),
            auth_required,
            cors_allowed_origins: Vec::new(),
        };
        let state = AppState {
            pool,
            config: Arc::new(config),
        };
        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    /// Like `send`, but parses the response body as JSON.
    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, token, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

/// Signs up `username` and returns a bearer token from a fresh login.
pub async fn token_for(app: &TestApp, username: &str, password: &str) -> String {
    let creds = json!({"username": username, "password": password});
    let (status, _) = app
        .send(Method::POST, "/auth/signup", None, Some(creds.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app
        .send_json(Method::POST, "/auth/login", None, Some(creds))
        .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}
