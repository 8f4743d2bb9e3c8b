//! Agent card documents and their validation rules.
//!
//! An agent card is the JSON capability document an agent publishes at a
//! well-known path. Every member is optional on the wire so that incomplete
//! cards still decode; [`validate_agent_card`] reports what a publishable card
//! is missing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider block of an agent card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentProvider {
    /// Organisation operating the agent.
    pub organization: Option<String>,
    /// Provider home page.
    pub url: Option<String>,
}

/// Skill advertised by an agent card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSkill {
    /// Unique skill identifier.
    pub id: Option<String>,
    /// Human-readable skill name.
    pub name: Option<String>,
    /// Skill description.
    pub description: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// Wire representation of an agent card.
///
/// Members not modelled here are preserved in `extra` so a fetched card can
/// be echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentCardDocument {
    /// Protocol version the agent speaks.
    pub protocol_version: Option<String>,
    /// Agent name.
    pub name: Option<String>,
    /// Agent description.
    pub description: Option<String>,
    /// Service endpoint the agent accepts messages on.
    pub url: Option<String>,
    /// Agent version.
    pub version: Option<String>,
    /// Advertised skills.
    pub skills: Option<Vec<AgentSkill>>,
    /// Operating provider.
    pub provider: Option<AgentProvider>,
    /// Capability flags, either an object of booleans or a list of names.
    pub capabilities: Option<Value>,
    /// Members not covered by the typed fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of validating an agent card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardValidationReport {
    /// Problems that make the card unusable.
    pub errors: Vec<String>,
    /// Recommended fields that are missing.
    pub warnings: Vec<String>,
}

impl CardValidationReport {
    /// Returns whether the card has no errors. Warnings do not invalidate it.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

/// Checks an agent card for required and recommended members.
///
/// Required: `protocolVersion`, `name`, `description`, `url`, and `id`,
/// `name` and `description` on every skill. Recommended: at least one skill,
/// `version`, and `provider.organization`.
#[must_use]
pub fn validate_agent_card(card: &AgentCardDocument) -> CardValidationReport {
    let mut report = CardValidationReport::default();

    let required = [
        (card.protocol_version.as_ref(), "Protocol version is required"),
        (card.name.as_ref(), "Agent name is required"),
        (card.description.as_ref(), "Agent description is required"),
        (card.url.as_ref(), "Service endpoint URL is required"),
    ];
    for (value, message) in required {
        if is_blank(value) {
            report.errors.push(message.to_owned());
        }
    }

    let skills = card.skills.as_deref().unwrap_or_default();
    if skills.is_empty() {
        report.warnings.push("No skills defined".to_owned());
    }
    if is_blank(card.version.as_ref()) {
        report.warnings.push("Agent version not specified".to_owned());
    }
    let organization = card
        .provider
        .as_ref()
        .and_then(|provider| provider.organization.as_ref());
    if is_blank(organization) {
        report
            .warnings
            .push("Provider organization not specified".to_owned());
    }

    for (position, skill) in (1_usize..).zip(skills) {
        let checks = [
            (skill.id.as_ref(), "ID"),
            (skill.name.as_ref(), "Name"),
            (skill.description.as_ref(), "Description"),
        ];
        for (value, field) in checks {
            if is_blank(value) {
                report
                    .errors
                    .push(format!("Skill {position}: {field} is required"));
            }
        }
    }

    report
}
