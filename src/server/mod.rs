//! MCP server over newline-delimited JSON-RPC.
//!
//! One request per line in, one response per line out. Notifications get no
//! reply. Requests are answered in arrival order.

pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod tools;

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::core::Gateway;
use protocol::{
    INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, McpRequest, McpResponse, PARSE_ERROR,
    PROTOCOL_VERSION,
};
pub use tools::ToolRegistry;

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "ClickUp MCP Server";

#[derive(Debug, Deserialize)]
struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    protocol_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct GetPromptParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// ClickUp MCP server bound to a gateway.
pub struct McpServer<G> {
    gateway: G,
    tools: ToolRegistry,
}

impl<G: Gateway> McpServer<G> {
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            tools: ToolRegistry::new(),
        }
    }

    /// Handle one raw input line.
    pub async fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable message");
                return Some(McpResponse::failure(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(McpResponse::failure(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )),
        }
    }

    /// Handle a decoded request. Returns `None` for notifications.
    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        if !request.expects_response() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }

        if request.id == Some(Value::Null) {
            return Some(McpResponse::failure(
                request.id,
                INVALID_REQUEST,
                "Request id must not be null",
            ));
        }

        if request.jsonrpc.as_deref().is_some_and(|v| v != "2.0") {
            return Some(McpResponse::failure(
                request.id,
                INVALID_REQUEST,
                "jsonrpc must be \"2.0\"",
            ));
        }

        tracing::debug!(method = %request.method, "request");
        let params = request.params.unwrap_or(Value::Null);
        let result = match request.method.as_str() {
            "initialize" => Ok(self.initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.tools.definitions() })),
            "tools/call" => self.call_tool(params).await,
            "resources/list" => Ok(json!({ "resources": resources::list() })),
            "resources/templates/list" => {
                Ok(json!({ "resourceTemplates": resources::templates() }))
            }
            "resources/read" => self.read_resource(params).await,
            "prompts/list" => Ok(json!({ "prompts": prompts::list() })),
            "prompts/get" => Self::get_prompt(params),
            other => Err((METHOD_NOT_FOUND, format!("Method not found: {other}"))),
        };

        Some(match result {
            Ok(result) => McpResponse::success(request.id, result),
            Err((code, message)) => McpResponse::failure(request.id, code, message),
        })
    }

    fn initialize(&self, params: &Value) -> Value {
        let requested = InitializeParams::deserialize(params)
            .ok()
            .and_then(|p| p.protocol_version);
        let version = requested.as_deref().unwrap_or(PROTOCOL_VERSION);
        tracing::info!(protocol = version, "client initialized");
        protocol::initialize_result(version, SERVER_NAME, env!("CARGO_PKG_VERSION"))
    }

    async fn call_tool(&self, params: Value) -> Result<Value, (i32, String)> {
        let params: CallToolParams =
            serde_json::from_value(params).map_err(|e| (INVALID_PARAMS, e.to_string()))?;
        let arguments = match params.arguments {
            None | Some(Value::Null) => json!({}),
            Some(arguments) => arguments,
        };

        let result = self
            .tools
            .call(&self.gateway, &params.name, &arguments)
            .await
            .ok_or_else(|| (INVALID_PARAMS, format!("Unknown tool: {}", params.name)))?;
        serde_json::to_value(result).map_err(|e| (protocol::INTERNAL_ERROR, e.to_string()))
    }

    async fn read_resource(&self, params: Value) -> Result<Value, (i32, String)> {
        let params: ReadResourceParams =
            serde_json::from_value(params).map_err(|e| (INVALID_PARAMS, e.to_string()))?;

        match resources::read(&self.gateway, &params.uri).await {
            Ok(contents) => Ok(json!({ "contents": [contents] })),
            Err(e) => {
                tracing::warn!(uri = %params.uri, error = %e, "resource read failed");
                Err((e.code(), e.to_string()))
            }
        }
    }

    fn get_prompt(params: Value) -> Result<Value, (i32, String)> {
        let params: GetPromptParams =
            serde_json::from_value(params).map_err(|e| (INVALID_PARAMS, e.to_string()))?;
        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        prompts::get(&params.name, &arguments).map_err(|message| (INVALID_PARAMS, message))
    }

    /// Serve until the reader reaches end of input.
    ///
    /// # Errors
    ///
    /// Returns error if reading or writing the transport fails.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_vec(&response)?;
                out.push(b'\n');
                writer.write_all(&out).await?;
                writer.flush().await?;
            }
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Serve over the process's stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns error if stdio fails.
    pub async fn serve_stdio(&self) -> anyhow::Result<()> {
        tracing::info!("ClickUp MCP server started on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}
