//! ClickUp MCP server.
//!
//! Exposes the ClickUp REST API to Model Context Protocol clients as tools,
//! resources and a prompt, over newline-delimited JSON-RPC on stdio.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────────────┐
//! │     CLI     │──▶│ server (JSON-RPC, tools,     │
//! └─────────────┘   │ resources, prompts)          │
//!                   └──────────────┬───────────────┘
//!                                  │
//!                   ┌──────────────┴───────────────┐
//!                   │ core (operations, batch,     │
//!                   │ gateway)                     │
//!                   └──────────────┬───────────────┘
//!                                  │
//!                              ClickUp API
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod server;

pub use config::Config;
pub use crate::core::{ClickUpClient, ClickUpError, Gateway};
pub use server::McpServer;
