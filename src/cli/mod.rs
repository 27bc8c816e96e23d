//! CLI command parsing and execution.

pub mod auth;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::core::Gateway;
use crate::server::ToolRegistry;
use crate::server::protocol::McpToolResult;

/// ClickUp MCP server - expose ClickUp to MCP clients over stdio.
#[derive(Parser)]
#[command(name = "clickup-mcp")]
#[command(about = "MCP server for the ClickUp API")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (logs go to stderr).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout (the default).
    Serve,

    /// List the available tools.
    Tools {
        /// Print full definitions, including input schemas, as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Invoke one tool and print its output.
    Call {
        /// Tool name, e.g. `get-teams`.
        tool: String,

        /// Tool arguments as a JSON object.
        args: Option<String>,
    },

    /// Manage configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage the stored ClickUp API key.
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration, with the API key masked.
    Show,

    /// Show the configuration file path.
    Path,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store an API key in the system keychain.
    Login(LoginArgs),

    /// Remove the stored API key.
    Logout,
}

#[derive(Args)]
pub struct LoginArgs {
    /// API key; prompted for when omitted.
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Text for `tools`: one `name  description` line per tool, or JSON.
///
/// # Errors
///
/// Returns error if the definitions cannot be serialized.
pub fn render_tools(registry: &ToolRegistry, json: bool) -> anyhow::Result<String> {
    let tools = registry.definitions();
    if json {
        return Ok(serde_json::to_string_pretty(&tools)?);
    }

    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    Ok(tools
        .iter()
        .map(|t| format!("{:<width$}  {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Run a single tool the way `tools/call` would.
///
/// # Errors
///
/// Returns error if the arguments are not a JSON object or the tool is
/// unknown. Tool failures come back as an error result, not an `Err`.
pub async fn call_tool<G: Gateway + ?Sized>(
    gateway: &G,
    registry: &ToolRegistry,
    name: &str,
    args: Option<&str>,
) -> anyhow::Result<McpToolResult> {
    let args: Value = match args {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| anyhow::anyhow!("arguments must be a JSON object: {e}"))?,
        None => Value::Object(serde_json::Map::new()),
    };
    if !args.is_object() {
        anyhow::bail!("arguments must be a JSON object");
    }

    registry
        .call(gateway, name, &args)
        .await
        .ok_or_else(|| anyhow::anyhow!("Unknown tool: {name}"))
}
