//! HTTP surface of the registry and relay.
//!
//! [`router`] exposes the agent registry under `/a2a`, the tool-server
//! registry under `/mcp`, and the message relay as a server-sent event stream
//! at `POST /a2a/{agent_id}/message`. Registry responses use the
//! [`ApiResponse`] envelope.

mod agents;
mod error;
mod messages;
mod response;
mod state;
mod tool_servers;

pub use error::ApiError;
pub use messages::DONE_MARKER;
pub use response::ApiResponse;
pub use state::{AgentRegistry, AppState, HttpAppState, MessageRelay, ToolServerRegistry};

use crate::relay::ports::{DescriptorResolver, SessionConnector};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Builds the application router.
#[must_use]
pub fn router<D, S>(state: AppState<D, S>) -> Router
where
    D: DescriptorResolver + 'static,
    S: SessionConnector + 'static,
{
    Router::new()
        .route("/a2a", get(agents::list).post(agents::create))
        .route("/a2a/validate", post(agents::validate))
        .route("/a2a/fetch-card", post(agents::fetch_card))
        .route(
            "/a2a/{agent_id}",
            get(agents::show).put(agents::update).delete(agents::remove),
        )
        .route(
            "/a2a/{agent_id}/message",
            post(messages::send_message::<D, S>),
        )
        .route("/mcp", get(tool_servers::list).post(tool_servers::create))
        .route(
            "/mcp/{server_id}",
            get(tool_servers::show)
                .put(tool_servers::update)
                .delete(tool_servers::remove),
        )
        .route(
            "/mcp/{server_id}/tools",
            get(tool_servers::list_tools)
                .post(tool_servers::save_tools)
                .delete(tool_servers::clear_tools),
        )
        .route(
            "/mcp/{server_id}/tools/{tool_name}",
            delete(tool_servers::remove_tool),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
