use serde_json::{Value, json};

use super::{object, pretty, respond, tool};
use crate::core::clickup::team;
use crate::core::{Gateway, Result};
use crate::server::protocol::{McpTool, McpToolResult};

pub(super) fn definitions() -> Vec<McpTool> {
    vec![tool(
        "get-teams",
        "List the ClickUp workspaces (teams) the API key can access.",
        object(json!({}), &[]),
    )]
}

pub(super) async fn call<G: Gateway + ?Sized>(
    gateway: &G,
    name: &str,
    _args: &Value,
) -> Option<McpToolResult> {
    let result = match name {
        "get-teams" => respond("getting teams", get_teams(gateway).await),
        _ => return None,
    };
    Some(result)
}

async fn get_teams<G: Gateway + ?Sized>(gateway: &G) -> Result<String> {
    pretty(&team::get_teams(gateway).await?)
}
