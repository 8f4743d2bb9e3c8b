//! Mapping of service errors onto HTTP responses.

use super::ApiResponse;
use crate::{
    agent_registry::{
        domain::AgentDomainError, ports::AgentRegistryError, services::AgentRegistryServiceError,
    },
    relay::domain::RelayError,
    tool_registry::{
        domain::ToolRegistryDomainError, ports::McpServerRegistryError,
        services::McpServerRegistryServiceError,
    },
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

pub(super) const AGENT_NOT_REGISTERED: &str = "Agent id not registered";
pub(super) const SERVER_NOT_REGISTERED: &str = "Service id not registered";

/// Error returned by API handlers, rendered as a failed [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a `400 Bad Request` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a `404 Not Found` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn internal(err: &impl std::error::Error) -> Self {
        error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal storage error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiResponse::failure(self.message).into_response_with(self.status)
    }
}

impl From<AgentRegistryServiceError> for ApiError {
    fn from(err: AgentRegistryServiceError) -> Self {
        match err {
            AgentRegistryServiceError::Domain(AgentDomainError::EmptyAgentId)
            | AgentRegistryServiceError::Repository(AgentRegistryError::NotFound(_)) => {
                Self::not_found(AGENT_NOT_REGISTERED)
            }
            AgentRegistryServiceError::Domain(domain) => Self::bad_request(domain.to_string()),
            AgentRegistryServiceError::Repository(duplicate @ AgentRegistryError::DuplicateAgent(_)) => {
                Self::new(StatusCode::CONFLICT, duplicate.to_string())
            }
            AgentRegistryServiceError::Repository(other) => Self::internal(&other),
        }
    }
}

impl From<McpServerRegistryServiceError> for ApiError {
    fn from(err: McpServerRegistryServiceError) -> Self {
        match err {
            McpServerRegistryServiceError::NotFound(_)
            | McpServerRegistryServiceError::Domain(ToolRegistryDomainError::EmptyServerId)
            | McpServerRegistryServiceError::Repository(McpServerRegistryError::NotFound(_)) => {
                Self::not_found(SERVER_NOT_REGISTERED)
            }
            McpServerRegistryServiceError::Domain(
                missing @ ToolRegistryDomainError::ToolNotFound { .. },
            ) => Self::not_found(missing.to_string()),
            McpServerRegistryServiceError::Domain(domain) => Self::bad_request(domain.to_string()),
            McpServerRegistryServiceError::Repository(
                duplicate @ (McpServerRegistryError::DuplicateServer(_)
                | McpServerRegistryError::DuplicateServerName(_)),
            ) => Self::new(StatusCode::CONFLICT, duplicate.to_string()),
            McpServerRegistryServiceError::Repository(other) => Self::internal(&other),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_registry::domain::AgentId;
    use crate::endpoint::EndpointUrlError;
    use crate::tool_registry::domain::{McpServerId, McpServerName};
    use rstest::rstest;

    #[rstest]
    #[case(
        AgentRegistryServiceError::Repository(AgentRegistryError::NotFound(AgentId::new())),
        StatusCode::NOT_FOUND
    )]
    #[case(
        AgentRegistryServiceError::Domain(AgentDomainError::Endpoint(EndpointUrlError::Empty)),
        StatusCode::BAD_REQUEST
    )]
    #[case(
        AgentRegistryServiceError::Repository(AgentRegistryError::DuplicateAgent(AgentId::new())),
        StatusCode::CONFLICT
    )]
    #[case(
        AgentRegistryServiceError::Repository(AgentRegistryError::persistence(
            std::io::Error::other("lock poisoned")
        )),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn agent_errors_map_to_status(#[case] err: AgentRegistryServiceError, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(err).status(), expected);
    }

    #[test]
    fn duplicate_server_name_is_a_conflict() {
        let name = McpServerName::new("weather").expect("valid server name");
        let err = McpServerRegistryServiceError::Repository(
            McpServerRegistryError::DuplicateServerName(name),
        );

        assert_eq!(ApiError::from(err).status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unknown_server_uses_registry_message() {
        let err = McpServerRegistryServiceError::NotFound(McpServerId::new());

        let api_error = ApiError::from(err);

        assert_eq!(api_error.status(), StatusCode::NOT_FOUND);
        assert_eq!(api_error.message(), SERVER_NOT_REGISTERED);
    }

    #[test]
    fn card_fetch_failures_are_bad_gateway() {
        let err = RelayError::descriptor("http://agent.local", "unexpected status 404 Not Found");

        assert_eq!(ApiError::from(err).status(), StatusCode::BAD_GATEWAY);
    }
}
