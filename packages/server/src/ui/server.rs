//! Server execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{
    handler::{get_users, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState::in_memory(
///     Arc::new(RandomNameGenerator),
///     Arc::new(MonotonicClock::new(SystemClock)),
/// ));
/// Server::new(state, None).run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// Directory served as the fallback route (web client assets)
    static_dir: Option<PathBuf>,
}

impl Server {
    pub fn new(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Self {
        Self { state, static_dir }
    }

    /// Build the router: WebSocket endpoint, HTTP API and optional static files
    pub fn router(&self) -> Router {
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/users", get(get_users))
            .with_state(self.state.clone());

        let app = match &self.static_dir {
            Some(dir) => {
                tracing::info!("Serving static files from {}", dir.display());
                app.fallback_service(ServeDir::new(dir))
            }
            None => app,
        };

        app.layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
