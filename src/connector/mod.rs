//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion (Groq chat-completions API, mock for tests)
//! - HTTP API surface (axum proxy endpoint)
//! - Client side (proxy transport and conversation session)

pub mod adapter;
pub mod api;
pub mod client;

pub use adapter::*;
pub use client::*;
