//! Typed request bodies and response envelopes.
//!
//! Entities themselves stay as raw JSON: ClickUp is authoritative for their
//! shape and callers only forward them. Request bodies are typed so optional
//! fields are explicit and absent fields never reach the wire.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::error::{ClickUpError, Result};

/// Deserialize a present-but-null field as `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Decode a list envelope such as `{"teams": [...]}`.
pub(crate) fn unwrap_envelope<E: DeserializeOwned>(response: Value) -> Result<E> {
    serde_json::from_value(response.clone())
        .map_err(|e| ClickUpError::MalformedResponse(format!("{e}: {response}")))
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamsEnvelope {
    pub teams: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpacesEnvelope {
    pub spaces: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FoldersEnvelope {
    pub folders: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListsEnvelope {
    pub lists: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TasksEnvelope {
    pub tasks: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocsEnvelope {
    pub docs: Vec<Value>,
}

// Spaces

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSpaceParams {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSpaceParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_can_manage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_assignees: Option<bool>,
    /// Feature toggles, forwarded untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Map<String, Value>>,
}

// Folders

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderParams {
    pub name: String,
}

/// Options for `POST /space/{id}/folder/template/{templateId}`.
///
/// The `old_*` flags choose which task attributes are copied from the
/// template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateFolderFromTemplateOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_immediately: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_views: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_due_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_start_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_followers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_attachments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recur_settings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_tags: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_statuses: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_assignees: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_dependencies: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_dependencies: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_checklists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_subtask_assignees: Option<bool>,
    /// ISO 8601 date-time with offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// ISO 8601 date-time with offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remap_start_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_weekends: Option<bool>,
    /// `1`, `2` or explicit `null`.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub archived: Option<Option<u8>>,
}

impl CreateFolderFromTemplateOptions {
    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("start_date", &self.start_date), ("due_date", &self.due_date)] {
            if let Some(value) = value {
                chrono::DateTime::parse_from_rfc3339(value).map_err(|e| {
                    ClickUpError::Validation(format!(
                        "{field} must be an ISO 8601 date-time with offset: {e}"
                    ))
                })?;
            }
        }

        if let Some(Some(archived)) = self.archived {
            if !(1..=2).contains(&archived) {
                return Err(ClickUpError::Validation(format!(
                    "archived must be 1, 2 or null, got {archived}"
                )));
            }
        }

        Ok(())
    }
}

// Lists

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateListParams {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Unix timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// User id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_markdown_description: Option<bool>,
}

impl CreateListParams {
    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        match self.priority {
            Some(priority) if !(1..=4).contains(&priority) => Err(ClickUpError::Validation(
                format!("priority must be between 1 and 4, got {priority}"),
            )),
            _ => Ok(()),
        }
    }
}

// Tasks

/// Body of a task creation.
///
/// `dueDate` is a free-form string here, unlike the millisecond timestamp
/// `due_date` used by updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Add/remove sets for member fields on task updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rem: Option<Vec<u64>>,
}

/// Body of a task update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskParams {
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_item_id: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A single space clears the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Takes precedence over `description` on the ClickUp side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Unix timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<bool>,
    /// Parent task id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<i64>,
    /// Unix timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<MemberDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_assignees: Option<MemberDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchers: Option<MemberDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl UpdateTaskParams {
    /// Mark supplied dates as carrying a time component unless told otherwise.
    #[must_use]
    pub fn with_time_flags(mut self) -> Self {
        if self.due_date.is_some() && self.due_date_time.is_none() {
            self.due_date_time = Some(true);
        }
        if self.start_date.is_some() && self.start_date_time.is_none() {
            self.start_date_time = Some(true);
        }
        self
    }
}

/// Query parameters accepted by `PUT /task/{id}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_task_ids: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
}

impl UpdateTaskQuery {
    /// Render as a query string, empty unless custom task ids are requested.
    ///
    /// `team_id` is only meaningful alongside `custom_task_ids`; when it is
    /// missing the request still goes out and ClickUp decides.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.custom_task_ids != Some(true) {
            return String::new();
        }
        match self.team_id {
            Some(team_id) => format!("?custom_task_ids=true&team_id={team_id}"),
            None => "?custom_task_ids=true".to_string(),
        }
    }
}

/// One element of a bulk update: the target id plus its update body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskItem {
    #[serde(rename = "taskId", default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(flatten)]
    pub params: UpdateTaskParams,
}

// Documents

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDocumentParams {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePageParams {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Parent page id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Body of a page edit. The page title travels as `name` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditPageParams {
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
