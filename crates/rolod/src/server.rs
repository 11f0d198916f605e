//! HTTP server for rolod.

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::HandlerCx;
use crate::resolver::IntentResolver;
use crate::routes;

/// Application state shared across request handlers.
///
/// Everything here is read-only after startup; concurrent queries need
/// no coordination.
pub struct AppState {
    pub resolver: IntentResolver,
    pub cx: HandlerCx,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: IntentResolver, cx: HandlerCx) -> Self {
        Self {
            resolver,
            cx,
            start_time: Instant::now(),
        }
    }
}

/// Build the full router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::query_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until the process is stopped.
pub async fn run(state: AppState, listen_addr: &str) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!("Listening on http://{}", listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
