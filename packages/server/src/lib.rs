//! Real-time notification server.
//!
//! Tracks live WebSocket connections per user, pushes targeted and
//! group fan-out messages, and reaps dead connections as they are found.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
