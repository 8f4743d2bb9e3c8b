//! Relay orchestration.
//!
//! [`RelayService`] runs one relay per call: registry lookup, descriptor
//! resolution, session open and send, then frame normalization into the
//! caller's sink. The sink receives exactly one terminal event unless the
//! consumer goes away first.

use crate::{
    agent_registry::{
        domain::{AgentId, AgentRecord},
        ports::AgentLookup,
    },
    config::RelayConfig,
    relay::{
        domain::{CanonicalEvent, OutboundMessage, RelayError, RelayResult},
        normalizer::EventNormalizer,
        ports::{DescriptorResolver, FrameStream, SessionConnector},
    },
};
use futures::StreamExt;
use mockable::Clock;
use std::{future::Future, sync::Arc};
use tokio::{
    sync::mpsc,
    time::{Instant, timeout, timeout_at},
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{Instrument, debug, info, info_span, warn};

/// How a relay invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The stream ended normally and `complete` was delivered.
    Completed,
    /// A terminal fault occurred and `error` was delivered.
    Failed,
    /// The consumer closed the sink before the relay finished.
    Cancelled,
}

enum StreamEnd {
    Exhausted,
    Terminated,
    Cancelled,
}

/// Relays messages to registered agents and normalizes their responses.
pub struct RelayService<L, D, S, C>
where
    L: AgentLookup,
    D: DescriptorResolver,
    S: SessionConnector,
    C: Clock + Send + Sync,
{
    lookup: Arc<L>,
    resolver: Arc<D>,
    connector: Arc<S>,
    clock: Arc<C>,
    config: RelayConfig,
}

impl<L, D, S, C> Clone for RelayService<L, D, S, C>
where
    L: AgentLookup,
    D: DescriptorResolver,
    S: SessionConnector,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            resolver: Arc::clone(&self.resolver),
            connector: Arc::clone(&self.connector),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<L, D, S, C> RelayService<L, D, S, C>
where
    L: AgentLookup,
    D: DescriptorResolver,
    S: SessionConnector,
    C: Clock + Send + Sync,
{
    /// Creates a relay service.
    #[must_use]
    pub const fn new(
        lookup: Arc<L>,
        resolver: Arc<D>,
        connector: Arc<S>,
        clock: Arc<C>,
        config: RelayConfig,
    ) -> Self {
        Self {
            lookup,
            resolver,
            connector,
            clock,
            config,
        }
    }

    /// Returns the relay configuration.
    #[must_use]
    pub const fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Relays `message` to `agent_id`, pushing canonical events into `sink`.
    ///
    /// Events are forwarded as soon as they are produced. If every receiver
    /// of `sink` is dropped, the remote stream is dropped and the relay
    /// returns [`RelayOutcome::Cancelled`] without a terminal event.
    pub async fn relay_into(
        &self,
        agent_id: &str,
        message: &str,
        sink: &mpsc::Sender<CanonicalEvent>,
    ) -> RelayOutcome {
        let mut normalizer = EventNormalizer::new(&*self.clock);

        let (terminal, outcome) = match self.stream(agent_id, message, sink, &mut normalizer).await
        {
            Ok(StreamEnd::Cancelled) => {
                info!(agent_id, "relay cancelled by consumer");
                return RelayOutcome::Cancelled;
            }
            Ok(StreamEnd::Terminated) => return RelayOutcome::Failed,
            Ok(StreamEnd::Exhausted) => (normalizer.finish(), RelayOutcome::Completed),
            Err(err) => {
                warn!(agent_id, code = err.code(), error = %err, "relay failed");
                (normalizer.fail(&err), RelayOutcome::Failed)
            }
        };

        if let Some(event) = terminal
            && sink.send(event).await.is_err()
        {
            return RelayOutcome::Cancelled;
        }
        outcome
    }

    /// Spawns a relay on the runtime and returns its events as a stream.
    ///
    /// Dropping the returned stream cancels the relay.
    #[must_use]
    pub fn relay(
        &self,
        agent_id: impl Into<String>,
        message: impl Into<String>,
    ) -> ReceiverStream<CanonicalEvent>
    where
        L: 'static,
        D: 'static,
        S: 'static,
        C: 'static,
    {
        let (sink, events) = mpsc::channel(self.config.event_buffer());
        let service = self.clone();
        let agent = agent_id.into();
        let text = message.into();
        let span = info_span!("relay", agent_id = %agent);

        tokio::spawn(
            async move {
                let outcome = service.relay_into(&agent, &text, &sink).await;
                debug!(?outcome, "relay finished");
            }
            .instrument(span),
        );

        ReceiverStream::new(events)
    }

    async fn stream(
        &self,
        agent_id: &str,
        message: &str,
        sink: &mpsc::Sender<CanonicalEvent>,
        normalizer: &mut EventNormalizer<'_, C>,
    ) -> RelayResult<StreamEnd> {
        let record = self.snapshot(agent_id)?;
        info!(agent_id, endpoint = %record.endpoint_url(), "relay started");

        let deadline = self
            .config
            .stream_timeout()
            .map(|limit| Instant::now() + limit);

        let opening = self.send(&record, message, deadline);
        let mut frames = tokio::select! {
            biased;
            () = sink.closed() => return Ok(StreamEnd::Cancelled),
            opened = opening => opened?,
        };

        let mut forwarded = 0_usize;
        loop {
            let item = tokio::select! {
                biased;
                () = sink.closed() => return Ok(StreamEnd::Cancelled),
                polled = within(deadline, frames.next()) => polled?,
            };

            let frame = match item {
                None => {
                    debug!(agent_id, forwarded, "agent stream ended");
                    return Ok(StreamEnd::Exhausted);
                }
                Some(Err(RelayError::MalformedFrame(reason))) => {
                    warn!(agent_id, %reason, "skipping malformed frame");
                    continue;
                }
                Some(Err(err)) => return Err(err),
                Some(Ok(frame)) => frame,
            };

            let Some(event) = normalizer.push(&frame) else {
                continue;
            };
            let terminal = event.is_terminal();
            if sink.send(event).await.is_err() {
                return Ok(StreamEnd::Cancelled);
            }
            forwarded += 1;
            if terminal {
                warn!(agent_id, "agent reported a protocol error");
                return Ok(StreamEnd::Terminated);
            }
        }
    }

    fn snapshot(&self, agent_id: &str) -> RelayResult<AgentRecord> {
        AgentId::parse(agent_id)
            .ok()
            .and_then(|id| self.lookup.get_agent(&id))
            .ok_or_else(|| RelayError::AgentNotFound(agent_id.to_owned()))
    }

    async fn send(
        &self,
        record: &AgentRecord,
        message: &str,
        deadline: Option<Instant>,
    ) -> RelayResult<FrameStream> {
        let endpoint_url = record.endpoint_url();
        let descriptor = timeout(
            self.config.descriptor_timeout(),
            self.resolver.resolve(endpoint_url),
        )
        .await
        .map_err(|_elapsed| {
            RelayError::descriptor(
                endpoint_url.as_str(),
                format!("timed out after {:?}", self.config.descriptor_timeout()),
            )
        })??;

        let session = within(deadline, self.connector.open(&descriptor, endpoint_url)).await??;
        within(deadline, session.send_streaming(OutboundMessage::user_text(message))).await?
    }
}

async fn within<F: Future>(deadline: Option<Instant>, future: F) -> RelayResult<F::Output> {
    let Some(at) = deadline else {
        return Ok(future.await);
    };
    timeout_at(at, future)
        .await
        .map_err(|_elapsed| RelayError::Transport("stream deadline exceeded".to_owned()))
}
