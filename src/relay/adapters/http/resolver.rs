//! Agent card resolution over HTTP.

use crate::{
    agent_registry::domain::{AgentCardDocument, AgentDescriptor},
    endpoint::EndpointUrl,
    relay::{
        domain::{RelayError, RelayResult},
        ports::{AGENT_CARD_PATH, DescriptorResolver},
    },
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Fetches agent cards with a bounded GET request.
#[derive(Debug, Clone)]
pub struct HttpDescriptorResolver {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpDescriptorResolver {
    /// Creates a resolver using `client` and a per-request `timeout`.
    #[must_use]
    pub const fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetches the JSON document at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::DescriptorUnavailable`] when the request fails,
    /// the status is not a success, or the body is not a JSON object.
    pub async fn fetch_card(&self, url: &str) -> RelayResult<Value> {
        let unavailable = |reason: String| RelayError::descriptor(url, reason);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("unexpected status {status}")));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|err| unavailable(err.to_string()))?;
        if !document.is_object() {
            return Err(unavailable("agent card is not a JSON object".to_owned()));
        }

        Ok(document)
    }
}

#[async_trait]
impl DescriptorResolver for HttpDescriptorResolver {
    async fn resolve(&self, base_url: &EndpointUrl) -> RelayResult<AgentDescriptor> {
        let url = base_url.join(AGENT_CARD_PATH);
        let document = self.fetch_card(&url).await?;
        let card: AgentCardDocument = serde_json::from_value(document)
            .map_err(|err| RelayError::descriptor(&url, err.to_string()))?;
        let descriptor = AgentDescriptor::from_card(&card);
        debug!(%url, name = descriptor.name(), version = descriptor.version(), "resolved agent descriptor");
        Ok(descriptor)
    }
}
