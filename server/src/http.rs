//! HTTP API for dashboards polling the queue.
//!
//! Mirrors the operator commands: `GET /api/status`, `POST /api/chat` and
//! `DELETE /api/chat`, plus `GET /api/health`. Queue rejections map to 400.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use lib::{
    protocol::{ENDED_MESSAGE, MAX_FRAME_BYTES, added_message, error_message},
    queue::{QueueError, QueueStatus},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddChatRequest {
    #[serde(default)]
    customer_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ActionResponse {
    message: String,
    success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/chat", axum::routing::post(add_chat_handler).delete(end_chat_handler))
        .route("/api/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_FRAME_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn bad_request(error: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

fn queue_rejection(err: &QueueError) -> ApiError {
    bad_request(error_message(err))
}

async fn status_handler(State(state): State<ServerState>) -> Json<QueueStatus> {
    Json(state.status().await)
}

async fn add_chat_handler(
    State(state): State<ServerState>,
    payload: Result<Json<AddChatRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("malformed add chat body: {}", rejection.body_text());
        bad_request(rejection.body_text())
    })?;
    // a missing name is rejected by the same validation as a blank one
    let customer_name = request.customer_name.unwrap_or_default();
    let chat = state
        .add_chat(&customer_name)
        .await
        .map_err(|err| queue_rejection(&err))?;
    Ok(Json(ActionResponse {
        message: added_message(&chat),
        success: true,
    }))
}

async fn end_chat_handler(
    State(state): State<ServerState>,
) -> Result<Json<ActionResponse>, ApiError> {
    state
        .end_chat()
        .await
        .map_err(|err| queue_rejection(&err))?;
    Ok(Json(ActionResponse {
        message: ENDED_MESSAGE.to_owned(),
        success: true,
    }))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_owned(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use axum::{
        Router,
        body::{Body, Bytes},
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use lib::queue::{AgentPool, Dispatcher, QueueStatus};
    use tower::ServiceExt;

    use super::{ActionResponse, ErrorResponse, HealthResponse, router};
    use crate::state::ServerState;

    fn app(capacity: usize, agents: &[&str]) -> Router {
        let dispatcher = Dispatcher::new(
            NonZeroUsize::new(capacity).expect("non-zero capacity"),
            AgentPool::new(agents).expect("valid pool"),
        );
        router(ServerState::new(dispatcher))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = app.clone().oneshot(request).await.expect("infallible router");
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        (status, body)
    }

    fn add(name_json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(name_json.to_owned()))
            .expect("valid request")
    }

    fn end() -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri("/api/chat")
            .body(Body::empty())
            .expect("valid request")
    }

    fn status() -> Request<Body> {
        Request::builder()
            .uri("/api/status")
            .body(Body::empty())
            .expect("valid request")
    }

    #[tokio::test]
    async fn add_then_status_reports_assignment() {
        let app = app(2, &["A", "B"]);

        let (code, body) = send(&app, add(r#"{"customerName":"  X  "}"#)).await;
        assert_eq!(code, StatusCode::OK);
        let action: ActionResponse = serde_json::from_slice(&body).expect("action json");
        assert!(action.success);
        assert_eq!(action.message, "Chat request added for X");

        let (code, body) = send(&app, status()).await;
        assert_eq!(code, StatusCode::OK);
        let status: QueueStatus = serde_json::from_slice(&body).expect("status json");
        assert_eq!(status.total_chats, 1);
        assert_eq!(status.capacity, 2);
        assert_eq!(status.chats[0].agent_name().as_str(), "A");
        assert_eq!(status.agents.len(), 2);
    }

    #[tokio::test]
    async fn full_queue_is_a_bad_request() {
        let app = app(1, &["A"]);
        let (code, _) = send(&app, add(r#"{"customerName":"X"}"#)).await;
        assert_eq!(code, StatusCode::OK);

        let (code, body) = send(&app, add(r#"{"customerName":"Y"}"#)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).expect("error json");
        assert_eq!(error.error, "Error: Queue is full");
    }

    #[tokio::test]
    async fn blank_or_missing_name_is_a_bad_request() {
        let app = app(3, &["A"]);
        for body in [r#"{"customerName":"   "}"#, r#"{}"#, "not json"] {
            let (code, _) = send(&app, add(body)).await;
            assert_eq!(code, StatusCode::BAD_REQUEST, "body {}", body);
        }

        let (_, body) = send(&app, status()).await;
        let status: QueueStatus = serde_json::from_slice(&body).expect("status json");
        assert_eq!(status.total_chats, 0);
    }

    #[tokio::test]
    async fn blank_and_missing_names_share_one_message() {
        let app = app(3, &["A"]);
        for body in [r#"{"customerName":" \t "}"#, r#"{}"#] {
            let (code, raw) = send(&app, add(body)).await;
            assert_eq!(code, StatusCode::BAD_REQUEST, "body {}", body);
            let error: ErrorResponse = serde_json::from_slice(&raw).expect("error json");
            assert_eq!(error.error, "Error: Customer name is required", "body {}", body);
        }
    }

    #[tokio::test]
    async fn end_removes_oldest_or_reports_empty() {
        let app = app(3, &["A", "B"]);

        let (code, body) = send(&app, end()).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).expect("error json");
        assert_eq!(error.error, "Error: No active chats to end");

        send(&app, add(r#"{"customerName":"first"}"#)).await;
        send(&app, add(r#"{"customerName":"second"}"#)).await;
        let (code, body) = send(&app, end()).await;
        assert_eq!(code, StatusCode::OK);
        let action: ActionResponse = serde_json::from_slice(&body).expect("action json");
        assert_eq!(action.message, "Oldest chat ended");

        let (_, body) = send(&app, status()).await;
        let status: QueueStatus = serde_json::from_slice(&body).expect("status json");
        assert_eq!(status.total_chats, 1);
        assert_eq!(status.chats[0].customer_name().as_str(), "second");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app(1, &["A"]);
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .expect("valid request");
        let (code, body) = send(&app, request).await;
        assert_eq!(code, StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body).expect("health json");
        assert_eq!(health.status, "OK");
        assert!(!health.timestamp.is_empty());
    }
}
