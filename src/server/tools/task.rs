use serde::Deserialize;
use serde_json::{Value, json};

use super::{boolean, integer, number, object, parse, pretty, respond, string, strings, tool};
use crate::core::batch::{bulk_create_tasks, bulk_delete_tasks, bulk_update_tasks};
use crate::core::clickup::task;
use crate::core::clickup::types::{
    CreateTaskData, UpdateTaskItem, UpdateTaskParams, UpdateTaskQuery,
};
use crate::core::{Gateway, Result};
use crate::server::protocol::{McpTool, McpToolResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    list_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskArgs {
    task_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskArgs {
    list_id: String,
    #[serde(flatten)]
    data: CreateTaskData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTaskArgs {
    task_id: String,
    #[serde(flatten)]
    query: UpdateTaskQuery,
    #[serde(flatten)]
    params: UpdateTaskParams,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkCreateArgs {
    list_id: String,
    tasks_data: Vec<CreateTaskData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkUpdateArgs {
    tasks_data: Vec<UpdateTaskItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkDeleteArgs {
    task_ids: Vec<String>,
}

fn member_delta(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "add": { "type": "array", "items": { "type": "integer" } },
            "rem": { "type": "array", "items": { "type": "integer" } }
        }
    })
}

fn create_task_properties() -> Value {
    json!({
        "name": string("Task name"),
        "description": string("Task description"),
        "priority": integer("1 urgent, 2 high, 3 normal, 4 low"),
        "dueDate": string("Due date"),
        "assignees": strings("Assignee user ids"),
        "tags": strings("Tag names"),
    })
}

fn update_task_properties() -> Value {
    json!({
        "custom_item_id": { "type": ["integer", "null"], "description": "Custom task type id, null for a plain task" },
        "name": string("New name"),
        "description": string("New description, a single space clears it"),
        "markdown_content": string("Markdown description, overrides description"),
        "status": string("Status name"),
        "priority": integer("1 urgent, 2 high, 3 normal, 4 low"),
        "due_date": integer("Due date, Unix time in milliseconds"),
        "due_date_time": boolean("Whether the due date has a time component, defaults to true"),
        "parent": string("Parent task id"),
        "time_estimate": integer("Time estimate in milliseconds"),
        "start_date": integer("Start date, Unix time in milliseconds"),
        "start_date_time": boolean("Whether the start date has a time component, defaults to true"),
        "points": number("Sprint points"),
        "assignees": member_delta("Assignees to add and remove"),
        "group_assignees": member_delta("Group assignees to add and remove"),
        "watchers": member_delta("Watchers to add and remove"),
        "archived": boolean("Archive or unarchive"),
    })
}

/// Merge extra properties into a property map.
fn with_properties(mut base: Value, extra: Value) -> Value {
    if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
        base.extend(extra);
    }
    base
}

pub(super) fn definitions() -> Vec<McpTool> {
    vec![
        tool(
            "get-tasks",
            "List the tasks in a list.",
            object(json!({ "listId": string("List id") }), &["listId"]),
        ),
        tool(
            "get-task",
            "Get a single task.",
            object(json!({ "taskId": string("Task id") }), &["taskId"]),
        ),
        tool(
            "create-task",
            "Create a task in a list.",
            object(
                with_properties(
                    json!({ "listId": string("List id") }),
                    create_task_properties(),
                ),
                &["listId", "name"],
            ),
        ),
        tool(
            "update-task",
            "Update a task. Dates get their time flag set unless given explicitly.",
            object(
                with_properties(
                    json!({
                        "taskId": string("Task id, or custom task id with custom_task_ids"),
                        "custom_task_ids": boolean("Treat taskId as a custom task id"),
                        "team_id": integer("Workspace id, required with custom_task_ids"),
                    }),
                    update_task_properties(),
                ),
                &["taskId"],
            ),
        ),
        tool(
            "delete-task",
            "Delete a task.",
            object(json!({ "taskId": string("Task id") }), &["taskId"]),
        ),
        tool(
            "bulk-create-tasks",
            "Create several tasks in one list. Each task is attempted; the result lists successes and failures.",
            object(
                json!({
                    "listId": string("List id"),
                    "tasksData": {
                        "type": "array",
                        "items": object(create_task_properties(), &["name"]),
                    },
                }),
                &["listId", "tasksData"],
            ),
        ),
        tool(
            "bulk-update-tasks",
            "Update several tasks. Each update is attempted; the result lists successes and failures.",
            object(
                json!({
                    "tasksData": {
                        "type": "array",
                        "items": object(
                            with_properties(
                                json!({ "taskId": string("Task id") }),
                                update_task_properties(),
                            ),
                            &[],
                        ),
                    },
                }),
                &["tasksData"],
            ),
        ),
        tool(
            "bulk-delete-tasks",
            "Delete several tasks. Each delete is attempted; the result lists deleted ids and failures.",
            object(json!({ "taskIds": strings("Task ids") }), &["taskIds"]),
        ),
    ]
}

pub(super) async fn call<G: Gateway + ?Sized>(
    gateway: &G,
    name: &str,
    args: &Value,
) -> Option<McpToolResult> {
    let result = match name {
        "get-tasks" => respond("getting tasks", get_tasks(gateway, args).await),
        "get-task" => respond("getting task", get_task(gateway, args).await),
        "create-task" => respond("creating task", create_task(gateway, args).await),
        "update-task" => respond("updating task", update_task(gateway, args).await),
        "delete-task" => respond("deleting task", delete_task(gateway, args).await),
        "bulk-create-tasks" => respond(
            "in bulk-create-tasks operation",
            bulk_create(gateway, args).await,
        ),
        "bulk-update-tasks" => respond(
            "in bulk-update-tasks operation",
            bulk_update(gateway, args).await,
        ),
        "bulk-delete-tasks" => respond(
            "in bulk-delete-tasks operation",
            bulk_delete(gateway, args).await,
        ),
        _ => return None,
    };
    Some(result)
}

async fn get_tasks<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: ListArgs = parse(args)?;
    pretty(&task::get_tasks(gateway, &args.list_id).await?)
}

async fn get_task<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: TaskArgs = parse(args)?;
    pretty(&task::get_task(gateway, &args.task_id).await?)
}

async fn create_task<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: CreateTaskArgs = parse(args)?;
    pretty(&task::create_task(gateway, &args.list_id, &args.data).await?)
}

async fn update_task<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: UpdateTaskArgs = parse(args)?;
    let params = args.params.with_time_flags();
    pretty(&task::update_task(gateway, &args.task_id, &params, Some(args.query)).await?)
}

async fn delete_task<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: TaskArgs = parse(args)?;
    task::delete_task(gateway, &args.task_id).await?;
    Ok(format!("Task {} deleted successfully", args.task_id))
}

async fn bulk_create<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: BulkCreateArgs = parse(args)?;
    pretty(&bulk_create_tasks(gateway, &args.list_id, args.tasks_data).await)
}

async fn bulk_update<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: BulkUpdateArgs = parse(args)?;
    pretty(&bulk_update_tasks(gateway, args.tasks_data).await)
}

async fn bulk_delete<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: BulkDeleteArgs = parse(args)?;
    pretty(&bulk_delete_tasks(gateway, args.task_ids).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clickup::mock::{RecordingGateway, api_error};
    use reqwest::Method;

    fn text_json(result: &McpToolResult) -> Value {
        serde_json::from_str(&result.to_text()).unwrap()
    }

    #[tokio::test]
    async fn create_task_posts_body_without_list_id() {
        let gateway = RecordingGateway::returning(json!({ "id": "t1", "name": "Write docs" }));

        let result = call(
            &gateway,
            "create-task",
            &json!({ "listId": "l1", "name": "Write docs", "dueDate": "2025-06-01", "tags": ["docs"] }),
        )
        .await
        .unwrap();

        assert_eq!(text_json(&result), json!({ "id": "t1", "name": "Write docs" }));
        let call = gateway.last_call();
        assert_eq!(call.path, "/list/l1/task");
        assert_eq!(call.method, Method::POST);
        assert_eq!(
            call.body,
            Some(json!({ "name": "Write docs", "dueDate": "2025-06-01", "tags": ["docs"] }))
        );
    }

    #[tokio::test]
    async fn update_task_defaults_time_flags_and_splits_query() {
        let gateway = RecordingGateway::returning(json!({ "id": "t1" }));

        call(
            &gateway,
            "update-task",
            &json!({
                "taskId": "CU-42",
                "custom_task_ids": true,
                "team_id": 9001,
                "due_date": 1_700_000_000_000_i64,
                "start_date": 1_690_000_000_000_i64,
                "start_date_time": false
            }),
        )
        .await
        .unwrap();

        let call = gateway.last_call();
        assert_eq!(call.path, "/task/CU-42?custom_task_ids=true&team_id=9001");
        assert_eq!(call.method, Method::PUT);
        assert_eq!(
            call.body,
            Some(json!({
                "due_date": 1_700_000_000_000_i64,
                "due_date_time": true,
                "start_date": 1_690_000_000_000_i64,
                "start_date_time": false
            }))
        );
    }

    #[tokio::test]
    async fn update_task_without_query_has_bare_path() {
        let gateway = RecordingGateway::returning(json!({ "id": "t1" }));

        call(&gateway, "update-task", &json!({ "taskId": "t1", "status": "done" }))
            .await
            .unwrap();

        let call = gateway.last_call();
        assert_eq!(call.path, "/task/t1");
        assert_eq!(call.body, Some(json!({ "status": "done" })));
    }

    #[tokio::test]
    async fn delete_task_failure_is_reported() {
        let gateway = RecordingGateway::with(|_| Err(api_error(404, "Task not found")));

        let result = call(&gateway, "delete-task", &json!({ "taskId": "t1" }))
            .await
            .unwrap();

        assert!(result.is_error);
        assert_eq!(
            result.to_text(),
            "Error deleting task: ClickUp API error (404): Task not found"
        );
    }

    #[tokio::test]
    async fn bulk_create_reports_partial_failure() {
        let gateway = RecordingGateway::with(|call| {
            match call.body.as_ref().and_then(|b| b["name"].as_str()) {
                Some("broken") => Err(api_error(400, "Invalid priority")),
                Some(name) => Ok(json!({ "id": format!("id-{name}") })),
                None => Ok(json!({})),
            }
        });

        let result = call(
            &gateway,
            "bulk-create-tasks",
            &json!({
                "listId": "l1",
                "tasksData": [{ "name": "a" }, { "name": "broken", "priority": 7 }]
            }),
        )
        .await
        .unwrap();

        assert!(!result.is_error);
        assert_eq!(
            text_json(&result),
            json!({
                "succeeded": [{ "id": "id-a" }],
                "failed": [{
                    "taskData": { "name": "broken", "priority": 7 },
                    "error": "ClickUp API error (400): Invalid priority"
                }]
            })
        );
    }

    #[tokio::test]
    async fn bulk_update_sets_time_flags_per_item() {
        let gateway = RecordingGateway::returning(json!({ "id": "t1" }));

        call(
            &gateway,
            "bulk-update-tasks",
            &json!({ "tasksData": [{ "taskId": "t1", "due_date": 1_700_000_000_000_i64 }] }),
        )
        .await
        .unwrap();

        assert_eq!(
            gateway.last_call().body,
            Some(json!({ "due_date": 1_700_000_000_000_i64, "due_date_time": true }))
        );
    }

    #[tokio::test]
    async fn bulk_update_item_without_id_fails_alone() {
        let gateway = RecordingGateway::returning(json!({ "id": "t2" }));

        let result = call(
            &gateway,
            "bulk-update-tasks",
            &json!({ "tasksData": [{ "name": "orphan" }, { "taskId": "t2", "name": "kept" }] }),
        )
        .await
        .unwrap();

        let report = text_json(&result);
        assert_eq!(report["succeeded"], json!([{ "id": "t2" }]));
        assert_eq!(report["failed"][0]["error"], "Missing taskId");
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn bulk_delete_lists_deleted_ids() {
        let gateway = RecordingGateway::returning(json!({ "success": true }));

        let result = call(&gateway, "bulk-delete-tasks", &json!({ "taskIds": ["a", "b"] }))
            .await
            .unwrap();

        assert_eq!(text_json(&result), json!({ "succeeded": ["a", "b"], "failed": [] }));
    }

    #[tokio::test]
    async fn bulk_with_malformed_payload_is_an_operation_error() {
        let gateway = RecordingGateway::returning(json!({}));

        let result = call(&gateway, "bulk-delete-tasks", &json!({ "taskIds": "a" }))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(
            result
                .to_text()
                .starts_with("Error in bulk-delete-tasks operation: invalid arguments:")
        );
    }
}
