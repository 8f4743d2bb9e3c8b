//! Loopback agent serving an agent card and a `message/stream` endpoint.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures::{StreamExt, stream};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// How the agent answers a streamed message.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A `text/event-stream` body with one `data:` line per payload.
    EventStream(Vec<String>),
    /// A single `application/json` body.
    Json(Value),
    /// An empty response with the given status.
    Status(StatusCode),
    /// A `text/event-stream` body that sends the payloads and then drops the
    /// connection before the body is terminated.
    EventStreamThenAbort(Vec<String>),
}

/// What the agent serves at its well-known card path.
#[derive(Debug, Clone)]
enum CardBody {
    Document(Value),
    Raw(&'static str),
    Missing,
}

#[derive(Clone)]
struct AgentState {
    card: CardBody,
    reply: Reply,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Running fake agent, stopped when dropped.
pub struct FakeAgent {
    base_url: String,
    requests: Arc<Mutex<Vec<Value>>>,
    server: JoinHandle<()>,
}

impl FakeAgent {
    /// Starts an agent whose card points at its own `/rpc` endpoint.
    pub async fn spawn(reply: Reply) -> Self {
        Self::start(reply, |base| CardBody::Document(card(&format!("{base}/rpc")))).await
    }

    /// Starts an agent whose card advertises `service_url` instead.
    pub async fn spawn_pointing_at(service_url: String, reply: Reply) -> Self {
        Self::start(reply, move |_| CardBody::Document(card(&service_url))).await
    }

    /// Starts an agent that publishes no card.
    pub async fn spawn_without_card() -> Self {
        Self::start(Reply::Status(StatusCode::OK), |_| CardBody::Missing).await
    }

    /// Starts an agent whose card path answers `200` with `body` verbatim.
    pub async fn spawn_with_raw_card(body: &'static str) -> Self {
        Self::start(Reply::Status(StatusCode::OK), |_| CardBody::Raw(body)).await
    }

    async fn start(reply: Reply, card_for: impl FnOnce(&str) -> CardBody) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("loopback port should bind");
        let addr: SocketAddr = listener.local_addr().expect("bound address");
        let base_url = format!("http://{addr}");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = AgentState {
            card: card_for(&base_url),
            reply,
            requests: Arc::clone(&requests),
        };
        let app = Router::new()
            .route("/.well-known/agent.json", get(serve_card))
            .route("/rpc", post(serve_message))
            .with_state(state);
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake agent serves");
        });

        Self {
            base_url,
            requests,
            server,
        }
    }

    /// Returns the agent base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the JSON-RPC requests received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for FakeAgent {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Returns a loopback URL on which nothing is listening.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("loopback port should bind");
    let addr = listener.local_addr().expect("bound address");
    drop(listener);
    format!("http://{addr}")
}

/// Builds a complete agent card advertising `service_url`.
pub fn card(service_url: &str) -> Value {
    json!({
        "protocolVersion": "0.3.0",
        "name": "Loopback Echo",
        "description": "Echoes messages for tests",
        "url": service_url,
        "version": "0.1.0",
        "provider": {"organization": "Gropius Tests"},
        "capabilities": {"streaming": true},
        "skills": [{"id": "echo", "name": "Echo", "description": "Echoes input"}]
    })
}

async fn serve_card(State(state): State<AgentState>) -> Response {
    match state.card {
        CardBody::Document(document) => Json(document).into_response(),
        CardBody::Raw(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        CardBody::Missing => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn serve_message(State(state): State<AgentState>, Json(request): Json<Value>) -> Response {
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request);

    match state.reply {
        Reply::EventStream(payloads) => {
            let body: String = payloads.iter().map(|payload| sse_frame(payload)).collect();
            ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
        }
        Reply::Json(document) => Json(document).into_response(),
        Reply::Status(status) => status.into_response(),
        Reply::EventStreamThenAbort(payloads) => {
            let frames = stream::iter(payloads).map(|payload| Ok(sse_frame(&payload)));
            let abort = stream::once(async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Err::<String, _>(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "agent went away",
                ))
            });
            let body = Body::from_stream(frames.chain(abort));
            ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
        }
    }
}

fn sse_frame(payload: &str) -> String {
    format!("data: {payload}\n\n")
}
