//! Inbound HTTP adapter (axum)
//!
//! Routes:
//! - `GET /health`
//! - `POST /check-halal`

mod handlers;

pub use handlers::{HealthResponse, status_for};

use axum::{
    Router,
    routing::{get, post},
};
use halal_check_domain::{ProductGateway, usecases::CheckUseCase};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    usecase: CheckUseCase<dyn ProductGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ProductGateway>) -> Self {
        Self {
            usecase: CheckUseCase::new(gateway),
        }
    }
}

/// Build the application router around a product gateway
pub fn router(gateway: Arc<dyn ProductGateway>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/check-halal", post(handlers::check_halal))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(gateway))
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve<F>(
    addr: SocketAddr,
    gateway: Arc<dyn ProductGateway>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        provider = gateway.provider(),
        "Server listening"
    );

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown)
        .await
}
