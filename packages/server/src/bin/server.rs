//! Real-time notification server.
//!
//! Tracks WebSocket connections per user and fans out group messages to members.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hibiki-server
//! cargo run --bin hibiki-server -- --host 0.0.0.0 --port 3000
//! HIBIKI_LOG_LEVEL=info cargo run --bin hibiki-server
//! ```

use std::sync::Arc;

use clap::Parser;
use hibiki_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryGroupRepository, InMemoryMessageRepository},
    },
    ui::{AppState, Server},
};
use hibiki_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hibiki-server")]
#[command(about = "Real-time notification server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIBIKI_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "HIBIKI_PORT", default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "HIBIKI_LOG_LEVEL", default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Create Repositories (in-memory database)
    let group_repository = Arc::new(InMemoryGroupRepository::new());
    let message_repository = Arc::new(InMemoryMessageRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let app_state = AppState::new(
        message_pusher,
        group_repository,
        message_repository,
        Arc::new(SystemClock),
    );

    // 4. Create and run the server
    let server = Server::new(app_state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
