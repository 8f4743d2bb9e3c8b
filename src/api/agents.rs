//! Agent registry endpoints under `/a2a`.

use super::{AgentRegistry, ApiError, ApiResponse, error::AGENT_NOT_REGISTERED};
use crate::{
    agent_registry::{
        domain::{
            AgentCardDocument, AgentDescriptor, AgentId, AgentRecord, AgentStatus,
            validate_agent_card,
        },
        services::RegisterAgentRequest,
    },
    relay::adapters::http::HttpDescriptorResolver,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Registration body: the agent base URL, its card, and catalogue metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct AgentMetadataBody {
    agent_card_url: String,
    agent_card: Option<AgentCardDocument>,
    status: Option<String>,
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

impl AgentMetadataBody {
    fn into_parts(self) -> Result<(RegisterAgentRequest, Option<AgentStatus>), ApiError> {
        let status = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(AgentStatus::try_from)
            .transpose()
            .map_err(|err| ApiError::bad_request(err.to_string()))?;

        let mut metadata = self.metadata;
        let mut request = RegisterAgentRequest::new(self.agent_card_url);
        if let Some(card) = self.agent_card {
            request = request.with_descriptor(AgentDescriptor::from_card(&card));
            let raw_card = serde_json::to_value(&card)
                .map_err(|err| ApiError::bad_request(err.to_string()))?;
            metadata.insert("agentCard".to_owned(), raw_card);
        }

        Ok((request.with_metadata(metadata), status))
    }
}

/// Body of `POST /a2a/fetch-card`.
#[derive(Debug, Deserialize)]
pub(super) struct FetchCardBody {
    #[serde(alias = "agentUrl")]
    agent_url: String,
}

fn parse_agent_id(raw: String) -> Result<AgentId, ApiError> {
    AgentId::parse(raw).map_err(|_| ApiError::not_found(AGENT_NOT_REGISTERED))
}

async fn apply_status(
    agents: &AgentRegistry,
    record: AgentRecord,
    status: Option<AgentStatus>,
) -> Result<AgentRecord, ApiError> {
    let updated = match status {
        Some(AgentStatus::Disabled) if record.status() == AgentStatus::Enabled => {
            agents.disable(record.id()).await?
        }
        Some(AgentStatus::Enabled) if record.status() == AgentStatus::Disabled => {
            agents.enable(record.id()).await?
        }
        _ => record,
    };
    Ok(updated)
}

/// `GET /a2a`
pub(super) async fn list(
    State(agents): State<Arc<AgentRegistry>>,
) -> Result<ApiResponse<Vec<AgentRecord>>, ApiError> {
    Ok(ApiResponse::ok(agents.list_all().await?))
}

/// `POST /a2a`
pub(super) async fn create(
    State(agents): State<Arc<AgentRegistry>>,
    Json(body): Json<AgentMetadataBody>,
) -> Result<Response, ApiError> {
    let (request, status) = body.into_parts()?;
    let registered = agents.register(request).await?;
    let record = apply_status(&agents, registered, status).await?;

    Ok(ApiResponse::ok(record)
        .with_message("A2A agent created successfully")
        .into_response_with(StatusCode::CREATED))
}

/// `GET /a2a/{agent_id}`
pub(super) async fn show(
    State(agents): State<Arc<AgentRegistry>>,
    Path(agent_id): Path<String>,
) -> Result<ApiResponse<AgentRecord>, ApiError> {
    let id = parse_agent_id(agent_id)?;
    let record = agents
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(AGENT_NOT_REGISTERED))?;
    Ok(ApiResponse::ok(record))
}

/// `PUT /a2a/{agent_id}`
pub(super) async fn update(
    State(agents): State<Arc<AgentRegistry>>,
    Path(agent_id): Path<String>,
    Json(body): Json<AgentMetadataBody>,
) -> Result<ApiResponse<AgentRecord>, ApiError> {
    let id = parse_agent_id(agent_id)?;
    let (request, status) = body.into_parts()?;
    let updated = agents.update(&id, request).await?;
    let record = apply_status(&agents, updated, status).await?;
    Ok(ApiResponse::ok(record).with_message("A2A agent updated successfully"))
}

/// `DELETE /a2a/{agent_id}`
pub(super) async fn remove(
    State(agents): State<Arc<AgentRegistry>>,
    Path(agent_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let id = parse_agent_id(agent_id)?;
    agents.delete(&id).await?;
    Ok(ApiResponse::done("Agent deleted successfully"))
}

/// `POST /a2a/validate`
///
/// Answers `200` for a valid card and `400` otherwise; the report is returned
/// either way.
#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub(super) async fn validate(Json(card): Json<AgentCardDocument>) -> Response {
    let report = validate_agent_card(&card);
    if report.is_valid() {
        ApiResponse::ok(report)
            .with_message("Agent card is valid")
            .into_response_with(StatusCode::OK)
    } else {
        let summary = report.errors.join("; ");
        ApiResponse::rejected(report)
            .with_message(summary)
            .into_response_with(StatusCode::BAD_REQUEST)
    }
}

/// `POST /a2a/fetch-card`
pub(super) async fn fetch_card(
    State(cards): State<Arc<HttpDescriptorResolver>>,
    Json(body): Json<FetchCardBody>,
) -> Result<ApiResponse<Value>, ApiError> {
    info!(url = %body.agent_url, "fetching agent card");
    let card = cards.fetch_card(body.agent_url.trim()).await?;
    Ok(ApiResponse::ok(card).with_message("Agent card fetched successfully"))
}
