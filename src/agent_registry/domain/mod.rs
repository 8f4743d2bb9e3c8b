//! Domain model for agent registration and capability descriptors.
//!
//! Agent records carry the endpoint the relay talks to and the descriptor
//! (agent card) the agent advertised. Infrastructure concerns are kept outside
//! the domain boundary.

mod card;
mod descriptor;
mod error;
mod ids;
mod record;
mod status;

pub use card::{
    AgentCardDocument, AgentProvider, AgentSkill, CardValidationReport, validate_agent_card,
};
pub use descriptor::AgentDescriptor;
pub use error::{AgentDomainError, ParseAgentStatusError};
pub use ids::AgentId;
pub use record::{AgentRecord, AgentRecordDetails};
pub use status::AgentStatus;
