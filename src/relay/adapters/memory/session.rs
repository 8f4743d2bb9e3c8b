//! Session connector replaying a fixed frame script.

use crate::{
    agent_registry::domain::AgentDescriptor,
    endpoint::EndpointUrl,
    relay::{
        domain::{OutboundMessage, RawFrame, RelayError, RelayResult},
        ports::{FrameStream, RemoteSession, SessionConnector},
    },
};
use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use std::{
    pin::Pin,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    task::{Context, Poll},
};

#[derive(Debug, Default)]
struct ScriptLog {
    opened: AtomicUsize,
    released: AtomicUsize,
    sent: Mutex<Vec<OutboundMessage>>,
    targets: Mutex<Vec<String>>,
}

/// Connector whose sessions replay a scripted frame sequence.
///
/// Every opened session sends the same script. With
/// [`ScriptedSessionConnector::holding_open`] the stream stays pending after
/// the last scripted item, which simulates an agent that never finishes.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSessionConnector {
    script: Vec<RelayResult<RawFrame>>,
    open_error: Option<RelayError>,
    send_error: Option<RelayError>,
    hold_open: bool,
    log: Arc<ScriptLog>,
}

impl ScriptedSessionConnector {
    /// Creates a connector replaying `script`.
    #[must_use]
    pub fn new(script: Vec<RelayResult<RawFrame>>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Makes [`SessionConnector::open`] fail with `error`.
    #[must_use]
    pub fn failing_open(mut self, error: RelayError) -> Self {
        self.open_error = Some(error);
        self
    }

    /// Makes [`RemoteSession::send_streaming`] fail with `error`.
    #[must_use]
    pub fn failing_send(mut self, error: RelayError) -> Self {
        self.send_error = Some(error);
        self
    }

    /// Keeps streams pending after the script is exhausted.
    #[must_use]
    pub const fn holding_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Returns how many sessions were opened.
    #[must_use]
    pub fn opened(&self) -> usize {
        self.log.opened.load(Ordering::SeqCst)
    }

    /// Returns how many frame streams have been dropped.
    #[must_use]
    pub fn released(&self) -> usize {
        self.log.released.load(Ordering::SeqCst)
    }

    /// Returns the messages sent through opened sessions.
    #[must_use]
    pub fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.log
            .sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the target chosen for each opened session.
    #[must_use]
    pub fn targets(&self) -> Vec<String> {
        self.log
            .targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SessionConnector for ScriptedSessionConnector {
    async fn open(
        &self,
        descriptor: &AgentDescriptor,
        endpoint_url: &EndpointUrl,
    ) -> RelayResult<Box<dyn RemoteSession>> {
        if let Some(error) = &self.open_error {
            return Err(error.clone());
        }

        self.log.opened.fetch_add(1, Ordering::SeqCst);
        let target = descriptor
            .url()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| endpoint_url.as_str())
            .to_owned();
        self.log
            .targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target);

        Ok(Box::new(ScriptedSession {
            connector: self.clone(),
        }))
    }
}

/// Session created by [`ScriptedSessionConnector`].
#[derive(Debug)]
pub struct ScriptedSession {
    connector: ScriptedSessionConnector,
}

#[async_trait]
impl RemoteSession for ScriptedSession {
    async fn send_streaming(self: Box<Self>, message: OutboundMessage) -> RelayResult<FrameStream> {
        let connector = self.connector;
        connector
            .log
            .sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);

        if let Some(error) = connector.send_error {
            return Err(error);
        }

        let scripted = stream::iter(connector.script);
        let frames: FrameStream = if connector.hold_open {
            scripted.chain(stream::pending()).boxed()
        } else {
            scripted.boxed()
        };

        Ok(ReleasingStream {
            inner: frames,
            log: connector.log,
        }
        .boxed())
    }
}

/// Frame stream that records when it is dropped.
struct ReleasingStream {
    inner: FrameStream,
    log: Arc<ScriptLog>,
}

impl Stream for ReleasingStream {
    type Item = RelayResult<RawFrame>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl Drop for ReleasingStream {
    fn drop(&mut self) {
        self.log.released.fetch_add(1, Ordering::SeqCst);
    }
}
