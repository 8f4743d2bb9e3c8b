//! Shared application state and its per-handler slices.

use crate::{
    agent_registry::{adapters::memory::InMemoryAgentRegistry, services::AgentRegistryService},
    config::RelayConfig,
    relay::{
        adapters::http::{HttpDescriptorResolver, HttpSessionConnector, build_http_client},
        ports::{DescriptorResolver, SessionConnector},
        services::RelayService,
    },
    tool_registry::{
        adapters::memory::InMemoryMcpServerRegistry, services::McpServerRegistryService,
    },
};
use axum::extract::FromRef;
use mockable::DefaultClock;
use std::sync::Arc;

/// Agent registry service used by the API.
pub type AgentRegistry = AgentRegistryService<InMemoryAgentRegistry, DefaultClock>;

/// Tool-server registry service used by the API.
pub type ToolServerRegistry = McpServerRegistryService<InMemoryMcpServerRegistry, DefaultClock>;

/// Relay service reading agents from the in-memory registry.
pub type MessageRelay<D, S> = RelayService<InMemoryAgentRegistry, D, S, DefaultClock>;

/// Application state wired with the HTTP relay adapters.
pub type HttpAppState = AppState<HttpDescriptorResolver, HttpSessionConnector>;

/// State shared by every handler.
///
/// The agent registry service and the relay read the same in-memory store,
/// so agents registered over the API are immediately reachable by the relay.
pub struct AppState<D, S>
where
    D: DescriptorResolver,
    S: SessionConnector,
{
    agents: Arc<AgentRegistry>,
    tool_servers: Arc<ToolServerRegistry>,
    relay: Arc<MessageRelay<D, S>>,
    cards: Arc<HttpDescriptorResolver>,
}

impl<D, S> Clone for AppState<D, S>
where
    D: DescriptorResolver,
    S: SessionConnector,
{
    fn clone(&self) -> Self {
        Self {
            agents: Arc::clone(&self.agents),
            tool_servers: Arc::clone(&self.tool_servers),
            relay: Arc::clone(&self.relay),
            cards: Arc::clone(&self.cards),
        }
    }
}

impl<D, S> AppState<D, S>
where
    D: DescriptorResolver,
    S: SessionConnector,
{
    /// Wires empty registries to a relay built from `resolver` and
    /// `connector`. `cards` serves the card-fetch endpoint.
    #[must_use]
    pub fn new(resolver: D, connector: S, cards: HttpDescriptorResolver, config: RelayConfig) -> Self {
        let registry = Arc::new(InMemoryAgentRegistry::new());
        let clock = Arc::new(DefaultClock);

        Self {
            agents: Arc::new(AgentRegistryService::new(
                Arc::clone(&registry),
                Arc::clone(&clock),
            )),
            tool_servers: Arc::new(McpServerRegistryService::new(
                Arc::new(InMemoryMcpServerRegistry::new()),
                Arc::clone(&clock),
            )),
            relay: Arc::new(RelayService::new(
                registry,
                Arc::new(resolver),
                Arc::new(connector),
                clock,
                config,
            )),
            cards: Arc::new(cards),
        }
    }

    /// Returns the agent registry service.
    #[must_use]
    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    /// Returns the tool-server registry service.
    #[must_use]
    pub fn tool_servers(&self) -> &ToolServerRegistry {
        &self.tool_servers
    }

    /// Returns the relay service.
    #[must_use]
    pub fn relay(&self) -> &MessageRelay<D, S> {
        &self.relay
    }
}

impl HttpAppState {
    /// Builds state whose relay talks to agents over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn over_http(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config)?;
        let resolver = HttpDescriptorResolver::new(client.clone(), config.descriptor_timeout());
        Ok(Self::new(
            resolver.clone(),
            HttpSessionConnector::new(client),
            resolver,
            config,
        ))
    }
}

impl<D, S> FromRef<AppState<D, S>> for Arc<AgentRegistry>
where
    D: DescriptorResolver,
    S: SessionConnector,
{
    fn from_ref(state: &AppState<D, S>) -> Self {
        Arc::clone(&state.agents)
    }
}

impl<D, S> FromRef<AppState<D, S>> for Arc<ToolServerRegistry>
where
    D: DescriptorResolver,
    S: SessionConnector,
{
    fn from_ref(state: &AppState<D, S>) -> Self {
        Arc::clone(&state.tool_servers)
    }
}

impl<D, S> FromRef<AppState<D, S>> for Arc<MessageRelay<D, S>>
where
    D: DescriptorResolver,
    S: SessionConnector,
{
    fn from_ref(state: &AppState<D, S>) -> Self {
        Arc::clone(&state.relay)
    }
}

impl<D, S> FromRef<AppState<D, S>> for Arc<HttpDescriptorResolver>
where
    D: DescriptorResolver,
    S: SessionConnector,
{
    fn from_ref(state: &AppState<D, S>) -> Self {
        Arc::clone(&state.cards)
    }
}
