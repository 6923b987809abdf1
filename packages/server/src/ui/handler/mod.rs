//! Request handlers.

mod http;
mod websocket;

pub use http::{
    add_group_member, create_group, get_connection_stats, get_group_detail, get_group_messages,
    get_message, health_check, send_message,
};
pub use websocket::websocket_handler;
