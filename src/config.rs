//! Runtime configuration for the relay pipeline.

use std::time::Duration;

/// Default bound on agent descriptor resolution.
pub const DEFAULT_DESCRIPTOR_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound on establishing a TCP/TLS connection to an agent.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default capacity of the per-relay event channel.
pub const DEFAULT_EVENT_BUFFER: usize = 32;

/// Timeouts and buffering applied to every relay invocation.
///
/// The streaming send is unbounded by default because an agent may
/// legitimately work for a long time before its final frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    descriptor_timeout: Duration,
    connect_timeout: Duration,
    stream_timeout: Option<Duration>,
    event_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            descriptor_timeout: DEFAULT_DESCRIPTOR_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            stream_timeout: None,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl RelayConfig {
    /// Sets the descriptor resolution timeout.
    #[must_use]
    pub const fn with_descriptor_timeout(mut self, timeout: Duration) -> Self {
        self.descriptor_timeout = timeout;
        self
    }

    /// Sets the connection establishment timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Bounds the whole streaming send, from request to final frame.
    #[must_use]
    pub const fn with_stream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stream_timeout = timeout;
        self
    }

    /// Sets the event channel capacity. Values below one are raised to one.
    #[must_use]
    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }

    /// Returns the descriptor resolution timeout.
    #[must_use]
    pub const fn descriptor_timeout(&self) -> Duration {
        self.descriptor_timeout
    }

    /// Returns the connection establishment timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the optional streaming deadline.
    #[must_use]
    pub const fn stream_timeout(&self) -> Option<Duration> {
        self.stream_timeout
    }

    /// Returns the event channel capacity.
    #[must_use]
    pub const fn event_buffer(&self) -> usize {
        self.event_buffer
    }
}
