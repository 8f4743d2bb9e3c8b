//! Unit tests for frame normalization.

use crate::relay::{
    domain::{CanonicalEvent, EventType, RawFrame, RelayError},
    normalizer::EventNormalizer,
};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

fn frame(value: Value) -> RawFrame {
    RawFrame::from_value(value).expect("test frame must be an object")
}

fn normalize(value: Value) -> Option<CanonicalEvent> {
    let clock = DefaultClock;
    let mut normalizer = EventNormalizer::new(&clock);
    normalizer.push(&frame(value))
}

fn data_of(event: Option<CanonicalEvent>) -> Value {
    let emitted = event.expect("frame should produce an event");
    Value::Object(emitted.data().clone())
}

// ── task ───────────────────────────────────────────────────────────

#[test]
fn task_frame_reports_id_and_state() {
    let event = normalize(json!({"kind": "task", "id": "t1", "status": {"state": "running"}}))
        .expect("task frame should produce an event");

    assert_eq!(event.event_type(), &EventType::Task);
    assert_eq!(
        Value::Object(event.data().clone()),
        json!({"taskId": "t1", "status": "running"})
    );
}

#[test]
fn task_frame_defaults_status_and_falls_back_to_task_id() {
    let data = data_of(normalize(json!({"kind": "task", "taskId": "t9"})));

    assert_eq!(data, json!({"taskId": "t9", "status": "created"}));
}

#[test]
fn enveloped_frame_matches_bare_frame() {
    let bare = normalize(json!({"kind": "task", "id": "t2"})).expect("bare frame");
    let wrapped =
        normalize(json!({"jsonrpc": "2.0", "id": 1, "result": {"kind": "task", "id": "t2"}}))
            .expect("wrapped frame");

    assert_eq!(bare.event_type(), wrapped.event_type());
    assert_eq!(bare.data(), wrapped.data());
}

#[test]
fn type_member_stands_in_for_kind() {
    let event = normalize(json!({"type": "task", "id": "t3"})).expect("task frame");

    assert_eq!(event.event_type(), &EventType::Task);
}

// ── status-update ──────────────────────────────────────────────────

#[test]
fn status_update_extracts_message_and_final_flag() {
    let data = data_of(normalize(json!({
        "kind": "status-update",
        "status": {"message": {"parts": [{"kind": "text", "text": "hi"}]}},
        "final": true
    })));

    assert_eq!(
        data,
        json!({"taskId": null, "message": "hi", "progress": null, "final": true})
    );
}

#[rstest]
#[case(json!({"kind": "status-update", "taskId": "t1", "progress": 40}), json!(40))]
#[case(json!({"kind": "status-update", "taskId": "t1", "status": {"progress": 0.5}}), json!(0.5))]
#[case(
    json!({"kind": "status-update", "taskId": "t1", "progress": 10, "status": {"progress": 90}}),
    json!(10)
)]
fn status_update_progress_prefers_top_level(#[case] input: Value, #[case] expected: Value) {
    let data = data_of(normalize(input));

    assert_eq!(data["progress"], expected);
    assert_eq!(data["final"], json!(false));
    assert_eq!(data["message"], json!(""));
}

#[test]
fn status_update_task_id_falls_back_to_id() {
    let data = data_of(normalize(json!({"kind": "status-update", "id": "t4"})));

    assert_eq!(data["taskId"], json!("t4"));
}

// ── artifact-update ────────────────────────────────────────────────

#[test]
fn artifact_without_text_is_dropped() {
    let event = normalize(json!({"kind": "artifact-update", "artifact": {"parts": [{"kind": "binary"}]}}));

    assert!(event.is_none());
}

#[test]
fn artifact_defaults_name_and_type() {
    let data = data_of(normalize(json!({
        "kind": "artifact-update",
        "taskId": "t1",
        "artifact": {"parts": [{"kind": "text", "text": "42 EUR"}]}
    })));

    assert_eq!(
        data,
        json!({
            "taskId": "t1",
            "name": "Generated Content",
            "content": "42 EUR",
            "artifactType": "text"
        })
    );
}

#[test]
fn artifact_name_falls_back_to_artifact_id() {
    let data = data_of(normalize(json!({
        "kind": "artifact-update",
        "artifact": {"artifactId": "a-1", "type": "markdown", "parts": [{"kind": "text", "text": "# hi"}]}
    })));

    assert_eq!(data["name"], json!("a-1"));
    assert_eq!(data["artifactType"], json!("markdown"));
}

// ── passthrough ────────────────────────────────────────────────────

#[test]
fn unrecognised_kind_passes_frame_through() {
    let input = json!({"kind": "message", "parts": [{"kind": "text", "text": "raw"}]});

    let event = normalize(input.clone()).expect("passthrough frame");

    assert_eq!(event.event_type(), &EventType::Passthrough("message".to_owned()));
    assert_eq!(Value::Object(event.data().clone()), input);
}

#[rstest]
#[case(json!({"payload": 1}))]
#[case(json!({"kind": "complete"}))]
#[case(json!({"kind": "error", "message": "spoofed"}))]
#[case(json!({"kind": 3, "type": "task", "id": "t6"}))]
fn missing_or_reserved_kinds_become_unknown(#[case] input: Value) {
    let event = normalize(input).expect("passthrough frame");

    assert_eq!(event.event_type(), &EventType::Unknown);
    assert!(!event.is_terminal());
}

#[test]
fn mistyped_task_id_keeps_the_task_shape() {
    let data = data_of(normalize(json!({"kind": "task", "id": 17, "status": {"state": "running"}})));

    assert_eq!(data, json!({"taskId": null, "status": "running"}));
}

#[test]
fn mistyped_status_members_fall_back_to_defaults() {
    let data = data_of(normalize(json!({
        "kind": "status-update",
        "taskId": "t5",
        "status": {"message": {"parts": "hi"}, "progress": 40},
        "progress": null,
        "final": "yes"
    })));

    assert_eq!(
        data,
        json!({"taskId": "t5", "message": "", "progress": 40, "final": false})
    );
}

#[rstest]
#[case(json!({"kind": "artifact-update", "artifact": {"artifactId": 7, "parts": [{"kind": "binary"}]}}))]
#[case(json!({"kind": "artifact-update", "artifact": "not an object"}))]
#[case(json!({"kind": "artifact-update", "artifact": {"parts": {"kind": "text", "text": "x"}}}))]
fn mistyped_artifact_without_text_is_dropped(#[case] input: Value) {
    assert!(normalize(input).is_none());
}

#[test]
fn mistyped_artifact_name_falls_back_to_default() {
    let data = data_of(normalize(json!({
        "kind": "artifact-update",
        "artifact": {"artifactId": 7, "type": false, "parts": [{"kind": "text", "text": "ok"}]}
    })));

    assert_eq!(data["name"], json!("Generated Content"));
    assert_eq!(data["artifactType"], json!("text"));
    assert_eq!(data["content"], json!("ok"));
}

// ── terminal behaviour ─────────────────────────────────────────────

#[test]
fn finishing_without_frames_completes_once() {
    let clock = DefaultClock;
    let mut normalizer = EventNormalizer::new(&clock);

    let first = normalizer.finish().expect("first finish completes");

    assert_eq!(first.event_type(), &EventType::Complete);
    assert!(first.data().is_empty());
    assert!(normalizer.finish().is_none());
    assert!(normalizer.fail(&RelayError::Transport("late".to_owned())).is_none());
}

#[test]
fn protocol_error_frame_terminates_normalizer() {
    let clock = DefaultClock;
    let mut normalizer = EventNormalizer::new(&clock);

    let error = normalizer
        .push(&frame(json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32000, "message": "boom"}})))
        .expect("error frame produces an event");

    assert_eq!(error.event_type(), &EventType::Error);
    assert_eq!(error.data()["code"], json!("protocol"));
    assert!(normalizer.is_terminated());
    assert!(normalizer.push(&frame(json!({"kind": "task", "id": "t1"}))).is_none());
    assert!(normalizer.finish().is_none());
}

#[test]
fn failure_event_carries_message_and_code() {
    let clock = DefaultClock;
    let mut normalizer = EventNormalizer::new(&clock);

    let event = normalizer
        .fail(&RelayError::AgentNotFound("missing".to_owned()))
        .expect("first failure is emitted");

    assert_eq!(
        Value::Object(event.data().clone()),
        json!({"message": "agent not found: missing", "code": "agent_not_found"})
    );
}

#[test]
fn events_serialize_with_type_tag() {
    let event = normalize(json!({"kind": "task", "id": "t1"})).expect("task frame");

    let value = serde_json::to_value(&event).expect("event serializes");

    assert_eq!(value["type"], json!("task"));
    assert!(value["timestamp"].is_string());
}
