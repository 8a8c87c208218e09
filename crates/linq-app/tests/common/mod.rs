#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use linq_app::{
    retry::{RetryPolicy, Sleeper},
    state::AppState,
    testsupport::{RecordingSleeper, ScriptedUpstream},
    upstream::Upstream,
};

pub const SECRET: &str = "integration-secret";

pub fn state_with(upstream: Arc<dyn Upstream>, sleeper: Arc<dyn Sleeper>) -> Arc<AppState> {
    state_with_policy(upstream, sleeper, RetryPolicy::default())
}

pub fn state_with_policy(
    upstream: Arc<dyn Upstream>,
    sleeper: Arc<dyn Sleeper>,
    upstream_retry: RetryPolicy,
) -> Arc<AppState> {
    Arc::new(AppState {
        db: linq_store::init_store(),
        upstream,
        sleeper,
        upstream_retry,
        token_secret: SECRET.to_string(),
        token_ttl_secs: 3600,
    })
}

pub fn default_state() -> Arc<AppState> {
    state_with(
        Arc::new(ScriptedUpstream::always_ok("ok")),
        Arc::new(RecordingSleeper::default()),
    )
}

pub fn app() -> Router {
    linq_app::app::build_router(default_state(), false)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        text: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, Some(body), None).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None, None).await
}
