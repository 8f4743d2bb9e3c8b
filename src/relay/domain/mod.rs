//! Domain types for the relay pipeline.

mod error;
mod event;
mod frame;
mod message;

pub use error::{RelayError, RelayResult};
pub use event::{CanonicalEvent, EventType};
pub use frame::RawFrame;
pub use message::{MessagePart, MessageRole, OutboundMessage};
