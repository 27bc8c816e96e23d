use serde::Deserialize;
use serde_json::{Value, json};

use super::{boolean, object, parse, pretty, respond, string, tool};
use crate::core::clickup::space;
use crate::core::clickup::types::{CreateSpaceParams, UpdateSpaceParams};
use crate::core::{Gateway, Result};
use crate::server::protocol::{McpTool, McpToolResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamArgs {
    team_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSpaceArgs {
    team_id: String,
    #[serde(flatten)]
    params: CreateSpaceParams,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpaceArgs {
    space_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSpaceArgs {
    space_id: String,
    #[serde(flatten)]
    params: UpdateSpaceParams,
}

pub(super) fn definitions() -> Vec<McpTool> {
    vec![
        tool(
            "create-space",
            "Create a space in a workspace.",
            object(
                json!({
                    "teamId": string("Workspace (team) id"),
                    "name": string("Space name"),
                }),
                &["teamId", "name"],
            ),
        ),
        tool(
            "get-spaces",
            "List the spaces of a workspace.",
            object(json!({ "teamId": string("Workspace (team) id") }), &["teamId"]),
        ),
        tool(
            "get-space",
            "Get a single space.",
            object(json!({ "spaceId": string("Space id") }), &["spaceId"]),
        ),
        tool(
            "update-space",
            "Rename a space or change its settings and feature toggles.",
            object(
                json!({
                    "spaceId": string("Space id"),
                    "name": string("New name"),
                    "color": string("Hex color"),
                    "private": boolean("Make the space private"),
                    "admin_can_manage": boolean("Let admins manage the space"),
                    "multiple_assignees": boolean("Allow several assignees per task"),
                    "features": {
                        "type": "object",
                        "description": "Feature toggles, passed to ClickUp as-is"
                    },
                }),
                &["spaceId"],
            ),
        ),
        tool(
            "delete-space",
            "Delete a space.",
            object(json!({ "spaceId": string("Space id") }), &["spaceId"]),
        ),
    ]
}

pub(super) async fn call<G: Gateway + ?Sized>(
    gateway: &G,
    name: &str,
    args: &Value,
) -> Option<McpToolResult> {
    let result = match name {
        "create-space" => respond("creating space", create_space(gateway, args).await),
        "get-spaces" => respond("getting spaces", get_spaces(gateway, args).await),
        "get-space" => respond("getting space", get_space(gateway, args).await),
        "update-space" => respond("updating space", update_space(gateway, args).await),
        "delete-space" => respond("deleting space", delete_space(gateway, args).await),
        _ => return None,
    };
    Some(result)
}

async fn create_space<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: CreateSpaceArgs = parse(args)?;
    pretty(&space::create_space(gateway, &args.team_id, &args.params).await?)
}

async fn get_spaces<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: TeamArgs = parse(args)?;
    pretty(&space::get_spaces(gateway, &args.team_id).await?)
}

async fn get_space<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: SpaceArgs = parse(args)?;
    pretty(&space::get_space(gateway, &args.space_id).await?)
}

async fn update_space<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: UpdateSpaceArgs = parse(args)?;
    pretty(&space::update_space(gateway, &args.space_id, &args.params).await?)
}

async fn delete_space<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: SpaceArgs = parse(args)?;
    space::delete_space(gateway, &args.space_id).await?;
    Ok(format!("Space {} deleted successfully", args.space_id))
}
