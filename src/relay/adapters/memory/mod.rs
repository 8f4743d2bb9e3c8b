//! In-process relay adapters for tests and local wiring.
//!
//! These adapters answer from preconfigured data instead of the network and
//! record how often they were called.

mod resolver;
mod session;

pub use resolver::StaticDescriptorResolver;
pub use session::{ScriptedSession, ScriptedSessionConnector};
