//! Orchestration services for the relay.

mod relay;

pub use relay::{RelayOutcome, RelayService};
