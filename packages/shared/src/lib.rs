//! Utilities shared across Hibiki packages.

pub mod logger;
pub mod time;
