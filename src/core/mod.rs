//! ClickUp access shared by the MCP server and the CLI.

pub mod batch;
pub mod clickup;
mod error;
pub mod keychain;

pub use batch::{BatchRunner, Sequential, TaskBatch};
pub use clickup::{ApiVersion, ClickUpClient, Gateway};
pub use error::{ClickUpError, Result};
