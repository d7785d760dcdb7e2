//! HTTP server

use std::net::SocketAddr;

use super::state::ServerState;
use crate::api;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn run(self) -> Result<(), BoxError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let app = api::build_app(&self.state).with_state(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, env = %self.state.config.environment, "Storefront server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Storefront server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
