//! Router tests driven through `tower::ServiceExt::oneshot`.

mod message_route_tests;
mod tool_server_route_tests;

use super::{AppState, router};
use crate::{
    agent_registry::domain::AgentDescriptor,
    config::RelayConfig,
    relay::adapters::{
        http::HttpDescriptorResolver,
        memory::{ScriptedSessionConnector, StaticDescriptorResolver},
    },
};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

type TestState = AppState<StaticDescriptorResolver, ScriptedSessionConnector>;

fn app_state(connector: ScriptedSessionConnector) -> TestState {
    AppState::new(
        StaticDescriptorResolver::new(AgentDescriptor::new("echo", "1.0.0")),
        connector,
        HttpDescriptorResolver::new(reqwest::Client::new(), Duration::from_secs(1)),
        RelayConfig::default(),
    )
}

/// Sends a request and returns the status and raw body text.
async fn call_raw(
    state: &TestState,
    method: Method,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = router(state.clone())
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Sends a request and decodes the JSON envelope.
async fn call(
    state: &TestState,
    method: Method,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let (status, text) = call_raw(state, method, uri, body).await;
    let envelope = serde_json::from_str(&text).expect("response should be JSON");
    (status, envelope)
}
