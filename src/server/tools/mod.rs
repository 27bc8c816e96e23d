//! Tool catalog and dispatch.
//!
//! Every tool parses its arguments into a typed struct before touching the
//! gateway, so malformed input never produces a request. Failures come back
//! as an error payload rather than a protocol error.

mod document;
mod folder;
mod list;
mod space;
mod task;
mod team;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::protocol::{McpTool, McpToolResult};
use crate::core::{ClickUpError, Gateway, Result};

/// Registry of the ClickUp tools exposed over MCP.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolRegistry;

impl ToolRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Definitions advertised in `tools/list`.
    #[must_use]
    pub fn definitions(&self) -> Vec<McpTool> {
        let mut tools = team::definitions();
        tools.extend(space::definitions());
        tools.extend(folder::definitions());
        tools.extend(list::definitions());
        tools.extend(task::definitions());
        tools.extend(document::definitions());
        tools
    }

    /// Run a tool. Returns `None` for an unknown name.
    pub async fn call<G: Gateway + ?Sized>(
        &self,
        gateway: &G,
        name: &str,
        args: &Value,
    ) -> Option<McpToolResult> {
        tracing::debug!(tool = %name, "calling tool");

        if let Some(result) = team::call(gateway, name, args).await {
            return Some(result);
        }
        if let Some(result) = space::call(gateway, name, args).await {
            return Some(result);
        }
        if let Some(result) = folder::call(gateway, name, args).await {
            return Some(result);
        }
        if let Some(result) = list::call(gateway, name, args).await {
            return Some(result);
        }
        if let Some(result) = task::call(gateway, name, args).await {
            return Some(result);
        }
        document::call(gateway, name, args).await
    }
}

/// Decode tool arguments.
fn parse<T: DeserializeOwned>(args: &Value) -> Result<T> {
    T::deserialize(args).map_err(|e| ClickUpError::Validation(e.to_string()))
}

/// Pretty-print a response for the text payload.
fn pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Wrap a tool outcome, prefixing failures with what was being attempted.
fn respond(action: &str, output: Result<String>) -> McpToolResult {
    match output {
        Ok(text) => McpToolResult::text(text),
        Err(e) => {
            tracing::warn!(action, error = %e, "tool failed");
            McpToolResult::error(format!("Error {action}: {e}"))
        }
    }
}

fn tool(name: &str, description: &str, input_schema: Value) -> McpTool {
    McpTool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn integer(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}

fn number(description: &str) -> Value {
    json!({ "type": "number", "description": description })
}

fn boolean(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

fn strings(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "string" }, "description": description })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clickup::mock::{RecordingGateway, api_error};
    use std::collections::HashSet;

    const EXPECTED: [&str; 30] = [
        "get-teams",
        "create-space",
        "get-spaces",
        "get-space",
        "update-space",
        "delete-space",
        "get-folders",
        "create-folder",
        "get-folder",
        "update-folder",
        "delete-folder",
        "create-folder-from-template",
        "get-lists",
        "create-list",
        "get-tasks",
        "get-task",
        "create-task",
        "update-task",
        "delete-task",
        "bulk-create-tasks",
        "bulk-update-tasks",
        "bulk-delete-tasks",
        "search-documents",
        "create-document",
        "get-document",
        "get-doc-pages",
        "create-page",
        "get-page",
        "edit-page",
        "create-audit-log",
    ];

    #[test]
    fn catalog_lists_every_tool_once() {
        let names: Vec<String> = ToolRegistry::new()
            .definitions()
            .into_iter()
            .map(|tool| tool.name)
            .collect();
        let unique: HashSet<&str> = names.iter().map(String::as_str).collect();

        assert_eq!(names.len(), unique.len());
        assert_eq!(unique, EXPECTED.into_iter().collect());
    }

    #[test]
    fn every_schema_is_an_object() {
        for tool in ToolRegistry::new().definitions() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(tool.input_schema["required"].is_array(), "{}", tool.name);
            assert!(!tool.description.is_empty(), "{}", tool.name);
        }
    }

    #[tokio::test]
    async fn every_listed_tool_dispatches() {
        let gateway = RecordingGateway::returning(json!({}));
        let registry = ToolRegistry::new();

        for name in EXPECTED {
            assert!(
                registry.call(&gateway, name, &json!({})).await.is_some(),
                "{name} not dispatched"
            );
        }
    }

    #[tokio::test]
    async fn unknown_tool_is_none() {
        let gateway = RecordingGateway::returning(json!({}));
        let registry = ToolRegistry::new();

        assert!(registry.call(&gateway, "get-everything", &json!({})).await.is_none());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_arguments_never_reach_gateway() {
        let gateway = RecordingGateway::returning(json!({}));

        let result = ToolRegistry::new()
            .call(&gateway, "create-task", &json!({ "listId": "l1" }))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.to_text().starts_with("Error creating task: invalid arguments:"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn api_failure_is_prefixed_with_action() {
        let gateway = RecordingGateway::with(|_| Err(api_error(401, "Token invalid")));

        let result = ToolRegistry::new()
            .call(&gateway, "get-teams", &json!({}))
            .await
            .unwrap();

        assert!(result.is_error);
        assert_eq!(
            result.to_text(),
            "Error getting teams: ClickUp API error (401): Token invalid"
        );
    }
}
