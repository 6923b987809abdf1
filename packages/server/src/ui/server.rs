//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        add_group_member, create_group, get_connection_stats, get_group_detail,
        get_group_messages, get_message, health_check, send_message, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Real-time notification server
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(message_pusher, group_repository, message_repository, clock);
/// Server::new(state).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(app_state: AppState) -> Self {
        Self {
            app_state: Arc::new(app_state),
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/stats", get(get_connection_stats))
            .route("/ws/{user_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/groups", post(create_group))
            .route("/api/groups/{group_id}", get(get_group_detail))
            .route("/api/groups/{group_id}/members", post(add_group_member))
            .route("/api/groups/{group_id}/messages", get(get_group_messages))
            .route("/api/messages", post(send_message))
            .route("/api/messages/{message_id}", get(get_message))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the server on the given host and port
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Connect to: ws://{}/ws/{{user_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await?;
        Ok(())
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        tracing::info!(
            "Notification server listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
