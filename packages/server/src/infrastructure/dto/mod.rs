//! Data Transfer Objects (DTOs)
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs (inbound frames and server messages)
//! - `http`: HTTP API request / response DTOs
//! - `conversion`: Domain Model → DTO conversions

pub mod conversion;
pub mod http;
pub mod websocket;
