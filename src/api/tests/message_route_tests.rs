//! Tests for the server-sent event relay route.

use super::{TestState, app_state, call, call_raw};
use crate::{
    api::DONE_MARKER,
    relay::{
        adapters::memory::ScriptedSessionConnector,
        domain::{RawFrame, RelayError, RelayResult},
    },
};
use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

fn frame(raw: &str) -> RelayResult<RawFrame> {
    RawFrame::parse(raw)
}

fn data_lines(body: &str) -> Vec<&str> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .collect()
}

fn decode(payloads: &[&str]) -> Vec<Value> {
    payloads
        .iter()
        .filter(|payload| **payload != DONE_MARKER)
        .map(|payload| serde_json::from_str(payload).expect("event payload is JSON"))
        .collect()
}

async fn register_agent(state: &TestState) -> String {
    let (status, body) = call(
        state,
        Method::POST,
        "/a2a",
        Some(&json!({"agentCardUrl": "http://echo.local:9000"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"]
        .as_str()
        .expect("created agent has an id")
        .to_owned()
}

#[tokio::test(flavor = "multi_thread")]
async fn streams_normalized_events_then_done() {
    let connector = ScriptedSessionConnector::new(vec![
        frame(r#"{"kind":"task","id":"t1","status":{"state":"working"}}"#),
        frame(
            r#"{"result":{"kind":"status-update","taskId":"t1","status":{"message":{"parts":[{"kind":"text","text":"hi"}]}},"final":true}}"#,
        ),
    ]);
    let state = app_state(connector.clone());
    let agent_id = register_agent(&state).await;

    let (status, body) = call_raw(
        &state,
        Method::POST,
        &format!("/a2a/{agent_id}/message"),
        Some(&json!({"message": "hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let payloads = data_lines(&body);
    assert_eq!(payloads.last(), Some(&DONE_MARKER));
    let events = decode(&payloads);
    let types: Vec<&str> = events
        .iter()
        .filter_map(|event| event["type"].as_str())
        .collect();
    assert_eq!(types, vec!["task", "status-update", "complete"]);
    let first = events.first().expect("task event");
    assert_eq!(first["data"], json!({"taskId": "t1", "status": "working"}));
    let second = events.get(1).expect("status event");
    assert_eq!(second["data"]["message"], json!("hi"));
    assert_eq!(second["data"]["final"], json!(true));

    let sent = connector.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent.first().map(|message| message.text()), Some("hello".to_owned()));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_agent_streams_single_error_event() {
    let connector = ScriptedSessionConnector::default();
    let state = app_state(connector.clone());

    let (status, body) = call_raw(
        &state,
        Method::POST,
        "/a2a/does-not-exist/message",
        Some(&json!({"message": "hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let payloads = data_lines(&body);
    assert_eq!(payloads.len(), 2);
    let events = decode(&payloads);
    let error = events.first().expect("error event");
    assert_eq!(error["type"], json!("error"));
    assert_eq!(error["data"]["code"], json!("agent_not_found"));
    assert_eq!(connector.opened(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_ends_with_error_not_complete() {
    let connector = ScriptedSessionConnector::new(vec![
        frame(r#"{"kind":"task","id":"t1"}"#),
        Err(RelayError::Transport("connection reset".to_owned())),
    ]);
    let state = app_state(connector);
    let agent_id = register_agent(&state).await;

    let (_, body) = call_raw(
        &state,
        Method::POST,
        &format!("/a2a/{agent_id}/message"),
        Some(&json!({"message": "hello"})),
    )
    .await;

    let events = decode(&data_lines(&body));
    let types: Vec<&str> = events
        .iter()
        .filter_map(|event| event["type"].as_str())
        .collect();
    assert_eq!(types, vec!["task", "error"]);
    let error = events.last().expect("error event");
    assert_eq!(error["data"]["code"], json!("transport"));
}
