//! Given steps for relay BDD scenarios.

use super::world::{RelayWorld, run_async, unregistered_id};
use eyre::WrapErr;
use gropius::{
    agent_registry::{
        domain::{AgentRecord, AgentRecordDetails},
        ports::AgentRegistryRepository,
    },
    endpoint::EndpointUrl,
    relay::domain::{RawFrame, RelayError},
};
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use serde_json::json;

fn push_frame(world: &mut RelayWorld, frame: &serde_json::Value) -> Result<(), eyre::Report> {
    let raw = RawFrame::from_value(frame.clone()).wrap_err("scripted frame must be an object")?;
    world.script.push(Ok(raw));
    Ok(())
}

#[given("a registered agent")]
fn a_registered_agent(world: &mut RelayWorld) -> Result<(), eyre::Report> {
    let endpoint = EndpointUrl::new("http://agent.local:9000").wrap_err("endpoint URL")?;
    let record = AgentRecord::new(AgentRecordDetails::new(endpoint), &DefaultClock);
    run_async(world.registry.register(&record)).wrap_err("register scenario agent")?;
    world.agent_id = Some(record.id().as_str().to_owned());
    Ok(())
}

#[given("an agent that was never registered")]
fn an_unregistered_agent(world: &mut RelayWorld) {
    world.agent_id = Some(unregistered_id());
}

#[given(r#"the agent reports the task "{task_id}" as "{state}""#)]
fn agent_reports_task(
    world: &mut RelayWorld,
    task_id: String,
    state: String,
) -> Result<(), eyre::Report> {
    push_frame(
        world,
        &json!({"kind": "task", "id": task_id, "status": {"state": state}}),
    )
}

#[given(r#"the agent sends the final status message "{text}""#)]
fn agent_sends_final_status(world: &mut RelayWorld, text: String) -> Result<(), eyre::Report> {
    push_frame(
        world,
        &json!({
            "result": {
                "kind": "status-update",
                "status": {"message": {"parts": [{"kind": "text", "text": text}]}},
                "final": true
            }
        }),
    )
}

#[given(r#"the agent reports the protocol error "{message}""#)]
fn agent_reports_protocol_error(world: &mut RelayWorld, message: String) -> Result<(), eyre::Report> {
    push_frame(
        world,
        &json!({"jsonrpc": "2.0", "id": "1", "error": {"code": -32000, "message": message}}),
    )
}

#[given("the agent sends a malformed frame")]
fn agent_sends_malformed_frame(world: &mut RelayWorld) {
    world
        .script
        .push(Err(RelayError::MalformedFrame("expected value at line 1".to_owned())));
}

#[given("the connection then drops")]
fn connection_drops(world: &mut RelayWorld) {
    world
        .script
        .push(Err(RelayError::Transport("connection reset by peer".to_owned())));
}
