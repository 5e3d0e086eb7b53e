//! Dashboard Web Server
//!
//! HTTP server for the Dashboard UI.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

use super::api::{self, AppState};
use crate::dashboard::ViewPhase;
use crate::render::RenderOptions;
use crate::report::ReportSource;

/// Dashboard server configuration
pub struct ServerConfig {
    pub port: u16,
    pub source: ReportSource,
    pub request_timeout: Option<Duration>,
    pub options: RenderOptions,
}

/// Main dashboard server
pub struct DashboardServer {
    config: ServerConfig,
}

impl DashboardServer {
    /// Create a new dashboard server
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Start the server. The report is loaded once, in the background.
    pub async fn start(self) -> Result<()> {
        let state = Arc::new(AppState::new(self.config.options.clone().live()));

        let loader = state.clone();
        let source = self.config.source.clone();
        let timeout = self.config.request_timeout;
        tokio::spawn(async move {
            load_into(&loader, &source, timeout).await;
        });

        let app = api::router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));

        println!("\n📊 Dashboard started!");
        println!("   Open: http://localhost:{}", self.config.port);
        println!("   Report: {}", self.config.source);
        println!("\n   Press Ctrl+C to stop.\n");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log::info!("Dashboard server stopped");
        Ok(())
    }
}

/// Load the report and move the shared phase out of `Loading`
pub async fn load_into(state: &AppState, source: &ReportSource, timeout: Option<Duration>) {
    log::info!("Loading report from {}", source);
    let result = source.load(timeout).await;
    if let Err(err) = &result {
        log::error!("Failed to load report: {}", err);
    }

    let phase = ViewPhase::from_load(result);
    *state.phase.write().await = phase;
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_report_moves_to_error() {
        let state = AppState::new(RenderOptions::default());
        assert_eq!(state.phase.read().await.name(), "loading");

        let source = ReportSource::File(PathBuf::from("/nonexistent/test-result.json"));
        load_into(&state, &source, None).await;

        assert_eq!(state.phase.read().await.name(), "error");
    }
}
