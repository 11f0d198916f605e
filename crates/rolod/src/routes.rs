//! API routes for rolod.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rolo_core::contact::UserId;
use rolo_core::response::Response;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::server::AppState;

type AppStateArc = Arc<AppState>;

/// Error body matching the original API shape.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    pub user_id: UserId,
}

pub fn query_routes() -> Router<AppStateArc> {
    Router::new().route("/api/chatbot/query", post(process_query))
}

/// Process a natural-language query end to end: resolve intent, then
/// dispatch to the matching handler. Every degradation path inside the
/// pipeline yields a 200 with a text response; only store or internal
/// failures become a 500.
async fn process_query(
    State(state): State<AppStateArc>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Response>, (StatusCode, Json<ErrorBody>)> {
    if req.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                message: "Query is required".to_string(),
            }),
        ));
    }

    let classification = state.resolver.resolve(&req.query).await;
    let response = crate::handlers::dispatch(
        classification.intent,
        &req.query,
        req.user_id,
        classification.entities.as_ref(),
        &state.cx,
    )
    .await
    .map_err(|e| {
        error!("Query handling failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: "Error processing chatbot query".to_string(),
            }),
        )
    })?;

    Ok(Json(response))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
