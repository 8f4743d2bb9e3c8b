//! Then steps for relay BDD scenarios.

use super::world::RelayWorld;
use gropius::relay::domain::CanonicalEvent;
use rstest_bdd_macros::then;
use serde_json::json;

fn terminal_event(world: &RelayWorld) -> Result<&CanonicalEvent, eyre::Report> {
    world
        .events
        .last()
        .ok_or_else(|| eyre::eyre!("consumer received no events"))
}

#[then(r#"the consumer receives the event types "{expected}""#)]
fn consumer_receives_types(world: &RelayWorld, expected: String) -> Result<(), eyre::Report> {
    let wanted: Vec<&str> = expected.split(',').map(str::trim).collect();
    let received: Vec<&str> = world
        .events
        .iter()
        .map(|event| event.event_type().as_str())
        .collect();
    if received != wanted {
        return Err(eyre::eyre!("expected {wanted:?}, received {received:?}"));
    }
    Ok(())
}

#[then(r#"the error code is "{code}""#)]
fn error_code_is(world: &RelayWorld, code: String) -> Result<(), eyre::Report> {
    let terminal = terminal_event(world)?;
    let actual = terminal.data().get("code");
    if actual != Some(&json!(code)) {
        return Err(eyre::eyre!("expected error code {code}, got {actual:?}"));
    }
    Ok(())
}

#[then(r#"the status message is "{text}""#)]
fn status_message_is(world: &RelayWorld, text: String) -> Result<(), eyre::Report> {
    let status = world
        .events
        .iter()
        .find(|event| event.event_type().as_str() == "status-update")
        .ok_or_else(|| eyre::eyre!("no status-update event received"))?;
    if status.data().get("message") != Some(&json!(text)) {
        return Err(eyre::eyre!("unexpected status data {:?}", status.data()));
    }
    Ok(())
}

#[then(r#"the agent received the text "{text}""#)]
fn agent_received_text(world: &RelayWorld, text: String) -> Result<(), eyre::Report> {
    let connector = world
        .connector
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no relay was run"))?;
    let sent: Vec<String> = connector
        .sent_messages()
        .iter()
        .map(|message| message.text())
        .collect();
    if sent != vec![text.clone()] {
        return Err(eyre::eyre!("expected one message {text:?}, agent received {sent:?}"));
    }
    Ok(())
}

#[then("no session was opened")]
fn no_session_opened(world: &RelayWorld) -> Result<(), eyre::Report> {
    let opened = world.connector.as_ref().map_or(0, |connector| connector.opened());
    if opened != 0 {
        return Err(eyre::eyre!("expected no sessions, {opened} opened"));
    }
    Ok(())
}
