//! CLI command handlers.

pub mod config;
pub mod copy;
pub mod session;
pub mod stats;
pub mod transform;
