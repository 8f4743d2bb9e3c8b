//! Port contracts for the relay pipeline.

pub mod resolver;
pub mod session;

pub use resolver::{AGENT_CARD_PATH, DescriptorResolver};
pub use session::{FrameStream, RemoteSession, SessionConnector};

#[cfg(test)]
pub use resolver::MockDescriptorResolver;
#[cfg(test)]
pub use session::MockSessionConnector;
