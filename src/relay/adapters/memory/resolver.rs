//! Descriptor resolver answering from a fixed result.

use crate::{
    agent_registry::domain::AgentDescriptor,
    endpoint::EndpointUrl,
    relay::{
        domain::{RelayError, RelayResult},
        ports::DescriptorResolver,
    },
};
use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Resolver returning the same descriptor, or the same failure, every time.
#[derive(Debug, Clone)]
pub struct StaticDescriptorResolver {
    outcome: RelayResult<AgentDescriptor>,
    calls: Arc<AtomicUsize>,
}

impl StaticDescriptorResolver {
    /// Creates a resolver that always succeeds with `descriptor`.
    #[must_use]
    pub fn new(descriptor: AgentDescriptor) -> Self {
        Self {
            outcome: Ok(descriptor),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a resolver that always fails with `error`.
    #[must_use]
    pub fn failing(error: RelayError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many times [`DescriptorResolver::resolve`] was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DescriptorResolver for StaticDescriptorResolver {
    async fn resolve(&self, _base_url: &EndpointUrl) -> RelayResult<AgentDescriptor> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
