use serde::Deserialize;
use serde_json::{Value, json};

use super::{boolean, integer, object, parse, pretty, respond, string, tool};
use crate::core::clickup::list;
use crate::core::clickup::types::CreateListParams;
use crate::core::{Gateway, Result};
use crate::server::protocol::{McpTool, McpToolResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FolderArgs {
    folder_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateListArgs {
    folder_id: String,
    #[serde(flatten)]
    params: CreateListParams,
}

pub(super) fn definitions() -> Vec<McpTool> {
    vec![
        tool(
            "get-lists",
            "List the lists in a folder.",
            object(json!({ "folderId": string("Folder id") }), &["folderId"]),
        ),
        tool(
            "create-list",
            "Create a list in a folder.",
            object(
                json!({
                    "folderId": string("Folder id"),
                    "name": string("List name"),
                    "content": string("List description"),
                    "due_date": integer("Due date, Unix time in milliseconds"),
                    "due_date_time": boolean("Whether the due date has a time component"),
                    "priority": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 4,
                        "description": "1 urgent, 2 high, 3 normal, 4 low"
                    },
                    "assignee": integer("User id of the list owner"),
                    "status": string("List color status"),
                    "include_markdown_description": boolean("Treat content as markdown"),
                }),
                &["folderId", "name"],
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
        "get-lists" => respond("getting lists", get_lists(gateway, args).await),
        "create-list" => respond("creating list", create_list(gateway, args).await),
        _ => return None,
    };
    Some(result)
}

async fn get_lists<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: FolderArgs = parse(args)?;
    pretty(&list::get_lists(gateway, &args.folder_id).await?)
}

async fn create_list<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: CreateListArgs = parse(args)?;
    args.params.validate()?;
    pretty(&list::create_list(gateway, &args.folder_id, &args.params).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clickup::mock::RecordingGateway;

    #[tokio::test]
    async fn create_list_keeps_folder_out_of_body() {
        let gateway = RecordingGateway::returning(json!({ "id": "l1", "name": "Backlog" }));

        let result = call(
            &gateway,
            "create-list",
            &json!({ "folderId": "f1", "name": "Backlog", "priority": 2 }),
        )
        .await
        .unwrap();

        assert!(!result.is_error);
        let call = gateway.last_call();
        assert_eq!(call.path, "/folder/f1/list");
        assert_eq!(call.body, Some(json!({ "name": "Backlog", "priority": 2 })));
    }

    #[tokio::test]
    async fn out_of_range_priority_is_rejected() {
        let gateway = RecordingGateway::returning(json!({}));

        let result = call(
            &gateway,
            "create-list",
            &json!({ "folderId": "f1", "name": "Backlog", "priority": 9 }),
        )
        .await
        .unwrap();

        assert!(result.is_error);
        assert_eq!(
            result.to_text(),
            "Error creating list: invalid arguments: priority must be between 1 and 4, got 9"
        );
        assert!(gateway.calls().is_empty());
    }
}
