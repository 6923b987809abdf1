//! UI 層（HTTP / WebSocket のエンドポイント）

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
