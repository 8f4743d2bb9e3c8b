//! HTTP adapters speaking the agent-to-agent wire protocol.

mod resolver;
mod session;

pub use resolver::HttpDescriptorResolver;
pub use session::{HttpRemoteSession, HttpSessionConnector};

use crate::config::RelayConfig;

/// Builds the HTTP client shared by the resolver and the session connector.
///
/// # Errors
///
/// Returns the `reqwest` error when the client cannot be initialised.
pub fn build_http_client(config: &RelayConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
