//! Shared world state for relay BDD scenarios.

use std::sync::Arc;

use gropius::{
    agent_registry::{
        adapters::memory::InMemoryAgentRegistry,
        domain::{AgentDescriptor, AgentId},
    },
    config::RelayConfig,
    relay::{
        adapters::memory::{ScriptedSessionConnector, StaticDescriptorResolver},
        domain::{CanonicalEvent, RawFrame, RelayResult},
        services::RelayService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Relay service wired to scripted adapters.
pub type ScriptedRelay = RelayService<
    InMemoryAgentRegistry,
    StaticDescriptorResolver,
    ScriptedSessionConnector,
    DefaultClock,
>;

/// Scenario world for relay behaviour tests.
pub struct RelayWorld {
    /// Registry the relay reads agents from.
    pub registry: Arc<InMemoryAgentRegistry>,
    /// Identifier messages are sent to.
    pub agent_id: Option<String>,
    /// Frames the agent will stream, in order.
    pub script: Vec<RelayResult<RawFrame>>,
    /// Connector used by the last relay.
    pub connector: Option<ScriptedSessionConnector>,
    /// Events received by the consumer.
    pub events: Vec<CanonicalEvent>,
}

impl RelayWorld {
    /// Creates a world with an empty registry and script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryAgentRegistry::new()),
            agent_id: None,
            script: Vec::new(),
            connector: None,
            events: Vec::new(),
        }
    }

    /// Builds a relay that replays the current script.
    pub fn relay_service(&mut self) -> ScriptedRelay {
        let connector = ScriptedSessionConnector::new(std::mem::take(&mut self.script));
        self.connector = Some(connector.clone());
        RelayService::new(
            Arc::clone(&self.registry),
            Arc::new(StaticDescriptorResolver::new(AgentDescriptor::new(
                "scripted", "1.0.0",
            ))),
            Arc::new(connector),
            Arc::new(DefaultClock),
            RelayConfig::default(),
        )
    }
}

impl Default for RelayWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RelayWorld {
    RelayWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Returns an identifier that is not present in any registry.
pub fn unregistered_id() -> String {
    AgentId::new().as_str().to_owned()
}
