//! Tool-server registry endpoints under `/mcp`.

use super::{ApiError, ApiResponse, ToolServerRegistry, error::SERVER_NOT_REGISTERED};
use crate::tool_registry::{
    domain::{McpServerId, McpServerRegistration, McpToolDefinition, ToolCatalogChange},
    services::RegisterMcpServerRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Registration body. Unrecognised members are stored as metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct McpServerBody {
    name: String,
    server_url: String,
    version: Option<String>,
    description: String,
    tags: Vec<String>,
    #[serde(rename = "tool_list", alias = "toolList", alias = "tools")]
    tool_list: Option<Vec<Value>>,
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

impl From<McpServerBody> for RegisterMcpServerRequest {
    fn from(body: McpServerBody) -> Self {
        Self {
            name: body.name,
            server_url: body.server_url,
            version: body.version,
            description: body.description,
            tags: body.tags,
            metadata: body.metadata,
            tools: body.tool_list,
        }
    }
}

/// Body of `POST /mcp/{server_id}/tools`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ToolsBody {
    #[serde(alias = "tool_list")]
    tools: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct ClearedTools {
    removed: usize,
}

fn parse_server_id(raw: String) -> Result<McpServerId, ApiError> {
    McpServerId::parse(raw).map_err(|_| ApiError::not_found(SERVER_NOT_REGISTERED))
}

/// `GET /mcp`
pub(super) async fn list(
    State(servers): State<Arc<ToolServerRegistry>>,
) -> Result<ApiResponse<Vec<McpServerRegistration>>, ApiError> {
    Ok(ApiResponse::ok(servers.list_all().await?))
}

/// `POST /mcp`
pub(super) async fn create(
    State(servers): State<Arc<ToolServerRegistry>>,
    Json(body): Json<McpServerBody>,
) -> Result<Response, ApiError> {
    let registered = servers.register(body.into()).await?;
    Ok(ApiResponse::ok(registered)
        .with_message("MCP server registered successfully")
        .into_response_with(StatusCode::CREATED))
}

/// `GET /mcp/{server_id}`
pub(super) async fn show(
    State(servers): State<Arc<ToolServerRegistry>>,
    Path(server_id): Path<String>,
) -> Result<ApiResponse<McpServerRegistration>, ApiError> {
    let id = parse_server_id(server_id)?;
    let server = servers
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(SERVER_NOT_REGISTERED))?;
    Ok(ApiResponse::ok(server))
}

/// `PUT /mcp/{server_id}`
pub(super) async fn update(
    State(servers): State<Arc<ToolServerRegistry>>,
    Path(server_id): Path<String>,
    Json(body): Json<McpServerBody>,
) -> Result<ApiResponse<McpServerRegistration>, ApiError> {
    let id = parse_server_id(server_id)?;
    let updated = servers.update(&id, body.into()).await?;
    Ok(ApiResponse::ok(updated).with_message("MCP server updated successfully"))
}

/// `DELETE /mcp/{server_id}`
pub(super) async fn remove(
    State(servers): State<Arc<ToolServerRegistry>>,
    Path(server_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let id = parse_server_id(server_id)?;
    servers.delete(&id).await?;
    Ok(ApiResponse::done("MCP deleted successfully"))
}

/// `GET /mcp/{server_id}/tools`
pub(super) async fn list_tools(
    State(servers): State<Arc<ToolServerRegistry>>,
    Path(server_id): Path<String>,
) -> Result<ApiResponse<Vec<McpToolDefinition>>, ApiError> {
    let id = parse_server_id(server_id)?;
    Ok(ApiResponse::ok(servers.list_tools(&id).await?))
}

/// `POST /mcp/{server_id}/tools`
pub(super) async fn save_tools(
    State(servers): State<Arc<ToolServerRegistry>>,
    Path(server_id): Path<String>,
    Json(body): Json<ToolsBody>,
) -> Result<ApiResponse<ToolCatalogChange>, ApiError> {
    let id = parse_server_id(server_id)?;
    let change = servers.upsert_tools(&id, body.tools).await?;
    Ok(ApiResponse::ok(change).with_message("MCP tools saved successfully"))
}

/// `DELETE /mcp/{server_id}/tools`
pub(super) async fn clear_tools(
    State(servers): State<Arc<ToolServerRegistry>>,
    Path(server_id): Path<String>,
) -> Result<ApiResponse<ClearedTools>, ApiError> {
    let id = parse_server_id(server_id)?;
    let removed = servers.clear_tools(&id).await?;
    Ok(ApiResponse::ok(ClearedTools { removed })
        .with_message("All MCP tools deleted successfully"))
}

/// `DELETE /mcp/{server_id}/tools/{tool_name}`
pub(super) async fn remove_tool(
    State(servers): State<Arc<ToolServerRegistry>>,
    Path((server_id, tool_name)): Path<(String, String)>,
) -> Result<ApiResponse<McpToolDefinition>, ApiError> {
    let id = parse_server_id(server_id)?;
    let removed = servers.remove_tool(&id, &tool_name).await?;
    Ok(ApiResponse::ok(removed).with_message("MCP tool deleted successfully"))
}
