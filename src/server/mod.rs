use crate::core::Ledger;
use crate::core::analytics::ForecastParams;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

/// Shared state handed to every handler. Immutable for the life of the server.
pub struct AppState {
    pub ledger: Ledger,
    pub params: ForecastParams,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/previsao", get(handlers::get_forecast))
        .route("/resumo", get(handlers::get_summary))
        .route("/contas", get(handlers::get_payables))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Serves the router on an already bound listener until the process exits.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await
}
