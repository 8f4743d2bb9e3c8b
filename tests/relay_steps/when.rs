//! When steps for relay BDD scenarios.

use super::world::{RelayWorld, run_async};
use futures::StreamExt;
use rstest_bdd_macros::when;

#[when(r#"the user sends "{message}" to the agent"#)]
fn user_sends_message(world: &mut RelayWorld, message: String) -> Result<(), eyre::Report> {
    let agent_id = world
        .agent_id
        .clone()
        .ok_or_else(|| eyre::eyre!("no agent chosen in scenario world"))?;
    let service = world.relay_service();
    world.events = run_async(service.relay(agent_id, message).collect::<Vec<_>>());
    Ok(())
}
