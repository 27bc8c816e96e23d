//! MCP JSON-RPC protocol types, server side.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Protocol revision assumed when the client does not name one.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const RESOURCE_NOT_FOUND: i32 = -32002;

/// Incoming JSON-RPC request or notification.
#[derive(Debug, Clone, Deserialize)]
pub struct McpRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Absent for notifications. An explicit `null` is kept as `Some(Null)`.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl McpRequest {
    /// Whether the sender expects a reply.
    #[must_use]
    pub const fn expects_response(&self) -> bool {
        self.id.is_some()
    }
}

/// Keep a present field even when it is `null`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Outgoing JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct McpResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    #[must_use]
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Tool advertised in `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    pub name: String,
    pub description: String,
    /// JSON Schema for input parameters
    pub input_schema: Value,
}

/// MCP content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpContent {
    Text { text: String },
}

/// Result of a `tools/call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolResult {
    pub content: Vec<McpContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl McpToolResult {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![McpContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![McpContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Concatenated text of all content blocks.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.content
            .iter()
            .map(|McpContent::Text { text }| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Resource or resource template advertised to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpResource {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_template: Option<String>,
    pub description: String,
    pub mime_type: &'static str,
}

/// Body of a `resources/read` answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpResourceContents {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// Initialize result
#[must_use]
pub fn initialize_result(protocol_version: &str, server_name: &str, version: &str) -> Value {
    serde_json::json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false },
            "prompts": { "listChanged": false }
        },
        "serverInfo": {
            "name": server_name,
            "version": version
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_without_id_is_notification() {
        let request: McpRequest =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
                .unwrap();
        assert!(!request.expects_response());

        let request: McpRequest =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 3, "method": "ping" })).unwrap();
        assert!(request.expects_response());
    }

    #[test]
    fn null_id_is_not_a_notification() {
        let request: McpRequest =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": null, "method": "ping" }))
                .unwrap();

        assert_eq!(request.id, Some(Value::Null));
        assert!(request.expects_response());
    }

    #[test]
    fn success_response_omits_error() {
        let response = McpResponse::success(Some(json!(1)), json!({}));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "jsonrpc": "2.0", "id": 1, "result": {} })
        );
    }

    #[test]
    fn failure_response_carries_code() {
        let response = McpResponse::failure(Some(json!("a")), METHOD_NOT_FOUND, "nope");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "jsonrpc": "2.0", "id": "a", "error": { "code": -32601, "message": "nope" } })
        );
    }

    #[test]
    fn tool_result_flags_errors_only() {
        assert_eq!(
            serde_json::to_value(McpToolResult::text("ok")).unwrap(),
            json!({ "content": [{ "type": "text", "text": "ok" }] })
        );
        assert_eq!(
            serde_json::to_value(McpToolResult::error("bad")).unwrap(),
            json!({ "content": [{ "type": "text", "text": "bad" }], "isError": true })
        );
    }

    #[test]
    fn tool_definition_uses_camel_case_schema_key() {
        let tool = McpTool {
            name: "get-teams".to_string(),
            description: "List teams".to_string(),
            input_schema: json!({ "type": "object" }),
        };
        let value = serde_json::to_value(tool).unwrap();
        assert_eq!(value["inputSchema"], json!({ "type": "object" }));
    }
}
