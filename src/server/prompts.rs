//! Prompt templates.

use serde_json::{Value, json};

const CREATE_TASK: &str = "create-task-from-requirements";

/// Definitions for `prompts/list`.
#[must_use]
pub fn list() -> Value {
    json!([{
        "name": CREATE_TASK,
        "description": "Turn free-form requirements into a ClickUp task",
        "arguments": [{
            "name": "requirements",
            "description": "What the task should accomplish",
            "required": true
        }]
    }])
}

/// Render a prompt. `Err` carries a message for an invalid-params reply.
pub fn get(name: &str, arguments: &Value) -> Result<Value, String> {
    if name != CREATE_TASK {
        return Err(format!("Unknown prompt: {name}"));
    }

    let requirements = arguments
        .get("requirements")
        .and_then(Value::as_str)
        .ok_or_else(|| "Missing required argument: requirements".to_string())?;

    Ok(json!({
        "messages": [{
            "role": "user",
            "content": {
                "type": "text",
                "text": format!("Create a ClickUp task based on these requirements:\n\n{requirements}")
            }
        }]
    }))
}
