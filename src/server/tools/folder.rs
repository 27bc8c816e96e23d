use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{boolean, object, parse, pretty, respond, string, tool};
use crate::core::clickup::folder;
use crate::core::clickup::types::{CreateFolderFromTemplateOptions, FolderParams};
use crate::core::{Gateway, Result};
use crate::server::protocol::{McpTool, McpToolResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetFoldersArgs {
    space_id: String,
    #[serde(default)]
    archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateFolderArgs {
    space_id: String,
    #[serde(flatten)]
    params: FolderParams,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FolderArgs {
    folder_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFolderArgs {
    folder_id: String,
    #[serde(flatten)]
    params: FolderParams,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FromTemplateArgs {
    space_id: String,
    template_id: String,
    options: CreateFolderFromTemplateOptions,
}

/// Schema for the template options: every copy flag is a boolean.
fn template_options_schema() -> Value {
    const COPY_FLAGS: [&str; 26] = [
        "return_immediately",
        "time_estimate",
        "automation",
        "include_views",
        "old_due_date",
        "old_start_date",
        "old_followers",
        "comment_attachments",
        "recur_settings",
        "old_tags",
        "old_statuses",
        "subtasks",
        "custom_type",
        "old_assignees",
        "attachments",
        "comment",
        "old_status",
        "external_dependencies",
        "internal_dependencies",
        "priority",
        "custom_fields",
        "old_checklists",
        "relationships",
        "old_subtask_assignees",
        "remap_start_date",
        "skip_weekends",
    ];

    let mut properties = Map::new();
    properties.insert("name".to_string(), string("Name of the new folder"));
    properties.insert("content".to_string(), string("Folder description"));
    for flag in COPY_FLAGS {
        properties.insert(flag.to_string(), boolean(&flag.replace('_', " ")));
    }
    properties.insert(
        "start_date".to_string(),
        json!({ "type": "string", "format": "date-time", "description": "ISO 8601 with offset" }),
    );
    properties.insert(
        "due_date".to_string(),
        json!({ "type": "string", "format": "date-time", "description": "ISO 8601 with offset" }),
    );
    properties.insert(
        "archived".to_string(),
        json!({
            "type": ["integer", "null"],
            "minimum": 1,
            "maximum": 2,
            "description": "Include archived items: 1, 2 or null"
        }),
    );

    object(Value::Object(properties), &["name"])
}

pub(super) fn definitions() -> Vec<McpTool> {
    vec![
        tool(
            "get-folders",
            "List the folders of a space.",
            object(
                json!({
                    "spaceId": string("Space id"),
                    "archived": boolean("Return archived folders instead"),
                }),
                &["spaceId"],
            ),
        ),
        tool(
            "create-folder",
            "Create a folder in a space.",
            object(
                json!({ "spaceId": string("Space id"), "name": string("Folder name") }),
                &["spaceId", "name"],
            ),
        ),
        tool(
            "get-folder",
            "Get a single folder.",
            object(json!({ "folderId": string("Folder id") }), &["folderId"]),
        ),
        tool(
            "update-folder",
            "Rename a folder.",
            object(
                json!({ "folderId": string("Folder id"), "name": string("New name") }),
                &["folderId", "name"],
            ),
        ),
        tool(
            "delete-folder",
            "Delete a folder.",
            object(json!({ "folderId": string("Folder id") }), &["folderId"]),
        ),
        tool(
            "create-folder-from-template",
            "Create a folder in a space from a folder template.",
            object(
                json!({
                    "spaceId": string("Space id"),
                    "templateId": string("Folder template id"),
                    "options": template_options_schema(),
                }),
                &["spaceId", "templateId", "options"],
            ),
        ),
    ]
}

pub(super) async fn call<G: Gateway + ?Sized>(
    gateway: &G,
    name: &str,
    args: &Value,
) -> Option<McpToolResult> {
    let result = match name {
        "get-folders" => respond("getting folders", get_folders(gateway, args).await),
        "create-folder" => respond("creating folder", create_folder(gateway, args).await),
        "get-folder" => respond("getting folder", get_folder(gateway, args).await),
        "update-folder" => respond("updating folder", update_folder(gateway, args).await),
        "delete-folder" => respond("deleting folder", delete_folder(gateway, args).await),
        "create-folder-from-template" => respond(
            "creating folder from template",
            create_from_template(gateway, args).await,
        ),
        _ => return None,
    };
    Some(result)
}

async fn get_folders<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: GetFoldersArgs = parse(args)?;
    pretty(&folder::get_folders(gateway, &args.space_id, args.archived).await?)
}

async fn create_folder<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: CreateFolderArgs = parse(args)?;
    pretty(&folder::create_folder(gateway, &args.space_id, &args.params).await?)
}

async fn get_folder<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: FolderArgs = parse(args)?;
    pretty(&folder::get_folder(gateway, &args.folder_id).await?)
}

async fn update_folder<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: UpdateFolderArgs = parse(args)?;
    pretty(&folder::update_folder(gateway, &args.folder_id, &args.params).await?)
}

async fn delete_folder<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: FolderArgs = parse(args)?;
    folder::delete_folder(gateway, &args.folder_id).await?;
    Ok(format!("Folder {} deleted successfully", args.folder_id))
}

async fn create_from_template<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: FromTemplateArgs = parse(args)?;
    args.options.validate()?;
    pretty(
        &folder::create_folder_from_template(
            gateway,
            &args.space_id,
            &args.template_id,
            &args.options,
        )
        .await?,
    )
}
