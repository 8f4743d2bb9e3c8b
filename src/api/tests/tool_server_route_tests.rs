//! Tests for the `/mcp` registry routes.

use super::{TestState, app_state, call};
use crate::relay::adapters::memory::ScriptedSessionConnector;
use axum::http::{Method, StatusCode};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn state() -> TestState {
    app_state(ScriptedSessionConnector::default())
}

async fn register_server(state: &TestState, name: &str) -> String {
    let (status, body) = call(
        state,
        Method::POST,
        "/mcp",
        Some(&json!({
            "name": name,
            "serverUrl": "http://tools.local:7000",
            "version": "0.4.1",
            "protocol": "streamable-http",
            "tool_list": [{"name": "forecast", "inputSchema": {"type": "object"}}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"]
        .as_str()
        .expect("created server has an id")
        .to_owned()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_keeps_metadata_and_initial_tools(state: TestState) {
    let server_id = register_server(&state, "weather").await;

    let (status, body) = call(&state, Method::GET, &format!("/mcp/{server_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["name"], json!("weather"));
    assert_eq!(data["enabled"], json!(true));
    assert_eq!(data["metadata"]["protocol"], json!("streamable-http"));
    assert_eq!(data["tools"][0]["name"], json!("forecast"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_names_conflict(state: TestState) {
    register_server(&state, "weather").await;

    let (status, body) = call(
        &state,
        Method::POST,
        "/mcp",
        Some(&json!({"name": "weather", "serverUrl": "http://other.local"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tool_catalog_lifecycle(state: TestState) {
    let server_id = register_server(&state, "weather").await;
    let tools_uri = format!("/mcp/{server_id}/tools");

    let (saved, saved_body) = call(
        &state,
        Method::POST,
        &tools_uri,
        Some(&json!({"tools": [
            {"name": "forecast", "description": "Daily forecast"},
            {"name": "alerts"}
        ]})),
    )
    .await;
    let (_, listed) = call(&state, Method::GET, &tools_uri, None).await;
    let (removed, _) = call(
        &state,
        Method::DELETE,
        &format!("{tools_uri}/forecast"),
        None,
    )
    .await;
    let (missing, _) = call(
        &state,
        Method::DELETE,
        &format!("{tools_uri}/forecast"),
        None,
    )
    .await;
    let (cleared, cleared_body) = call(&state, Method::DELETE, &tools_uri, None).await;

    assert_eq!(saved, StatusCode::OK);
    assert_eq!(saved_body["message"], json!("MCP tools saved successfully"));
    assert_eq!(saved_body["data"], json!({"added": 1, "replaced": 1}));
    assert_eq!(
        listed["data"],
        json!([
            {"name": "forecast", "description": "Daily forecast"},
            {"name": "alerts"}
        ])
    );
    assert_eq!(removed, StatusCode::OK);
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(cleared, StatusCode::OK);
    assert_eq!(cleared_body["data"], json!({"removed": 1}));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_renames_and_delete_removes(state: TestState) {
    let server_id = register_server(&state, "weather").await;
    let uri = format!("/mcp/{server_id}");

    let (updated, updated_body) = call(
        &state,
        Method::PUT,
        &uri,
        Some(&json!({"name": "weather-v2", "serverUrl": "https://tools.example.com"})),
    )
    .await;
    let (deleted, deleted_body) = call(&state, Method::DELETE, &uri, None).await;
    let (missing, missing_body) = call(&state, Method::GET, &uri, None).await;

    assert_eq!(updated, StatusCode::OK);
    assert_eq!(updated_body["data"]["name"], json!("weather-v2"));
    assert_eq!(updated_body["data"]["tools"][0]["name"], json!("forecast"));
    assert_eq!(deleted, StatusCode::OK);
    assert_eq!(deleted_body["message"], json!("MCP deleted successfully"));
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(missing_body["message"], json!("Service id not registered"));
}
