//! `clickup://` resources.

use serde_json::Value;

use super::protocol::{INTERNAL_ERROR, McpResource, McpResourceContents, RESOURCE_NOT_FOUND};
use crate::core::clickup::{document, folder, list, space, task, team};
use crate::core::{ClickUpError, Gateway};

const SCHEME: &str = "clickup://";
const MIME_TYPE: &str = "application/json";

/// Resource read failures.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] ClickUpError),
}

impl ResourceError {
    /// JSON-RPC error code for this failure.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::NotFound(_) => RESOURCE_NOT_FOUND,
            Self::Upstream(_) => INTERNAL_ERROR,
        }
    }
}

/// A parsed resource URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRoute {
    Teams,
    Spaces { team_id: String },
    Folders { space_id: String },
    Lists { folder_id: String },
    Tasks { list_id: String },
    Task { task_id: String },
    Document { team_id: String, doc_id: String },
}

impl ResourceRoute {
    /// Match a URI against the known templates.
    #[must_use]
    pub fn parse(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix(SCHEME)?;
        let segments: Vec<String> = rest
            .split('/')
            .map(|segment| {
                urlencoding::decode(segment)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| segment.to_string())
            })
            .collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }

        let route = match segments.as_slice() {
            [teams] if teams == "teams" => Self::Teams,
            [teams, id, spaces] if teams == "teams" && spaces == "spaces" => Self::Spaces {
                team_id: id.clone(),
            },
            [spaces, id, folders] if spaces == "spaces" && folders == "folders" => {
                Self::Folders {
                    space_id: id.clone(),
                }
            }
            [folders, id, lists] if folders == "folders" && lists == "lists" => Self::Lists {
                folder_id: id.clone(),
            },
            [lists, id, tasks] if lists == "lists" && tasks == "tasks" => Self::Tasks {
                list_id: id.clone(),
            },
            [tasks, id] if tasks == "tasks" => Self::Task {
                task_id: id.clone(),
            },
            [teams, team, docs, doc] if teams == "teams" && docs == "docs" => Self::Document {
                team_id: team.clone(),
                doc_id: doc.clone(),
            },
            _ => return None,
        };
        Some(route)
    }

    async fn fetch<G: Gateway + ?Sized>(&self, gateway: &G) -> Result<Value, ClickUpError> {
        Ok(match self {
            Self::Teams => Value::Array(team::get_teams(gateway).await?),
            Self::Spaces { team_id } => Value::Array(space::get_spaces(gateway, team_id).await?),
            Self::Folders { space_id } => {
                Value::Array(folder::get_folders(gateway, space_id, None).await?)
            }
            Self::Lists { folder_id } => Value::Array(list::get_lists(gateway, folder_id).await?),
            Self::Tasks { list_id } => Value::Array(task::get_tasks(gateway, list_id).await?),
            Self::Task { task_id } => task::get_task(gateway, task_id).await?,
            Self::Document { team_id, doc_id } => {
                document::get_document(gateway, team_id, doc_id).await?
            }
        })
    }
}

/// Static resources for `resources/list`.
#[must_use]
pub fn list() -> Vec<McpResource> {
    vec![McpResource {
        name: "teams".to_string(),
        uri: Some(format!("{SCHEME}teams")),
        uri_template: None,
        description: "Workspaces (teams) the API key can access".to_string(),
        mime_type: MIME_TYPE,
    }]
}

/// Parameterised resources for `resources/templates/list`.
#[must_use]
pub fn templates() -> Vec<McpResource> {
    [
        ("spaces", "teams/{teamId}/spaces", "Spaces of a workspace"),
        ("folders", "spaces/{spaceId}/folders", "Folders of a space"),
        ("lists", "folders/{folderId}/lists", "Lists of a folder"),
        ("tasks", "lists/{listId}/tasks", "Tasks of a list"),
        ("task", "tasks/{taskId}", "A single task"),
        ("document", "teams/{teamId}/docs/{docId}", "A single doc"),
    ]
    .into_iter()
    .map(|(name, path, description)| McpResource {
        name: name.to_string(),
        uri: None,
        uri_template: Some(format!("{SCHEME}{path}")),
        description: description.to_string(),
        mime_type: MIME_TYPE,
    })
    .collect()
}

/// Resolve a URI and fetch it as pretty JSON.
pub async fn read<G: Gateway + ?Sized>(
    gateway: &G,
    uri: &str,
) -> Result<McpResourceContents, ResourceError> {
    let route = ResourceRoute::parse(uri).ok_or_else(|| ResourceError::NotFound(uri.to_string()))?;
    tracing::debug!(uri, ?route, "reading resource");

    let value = route.fetch(gateway).await?;
    Ok(McpResourceContents {
        uri: uri.to_string(),
        mime_type: MIME_TYPE,
        text: serde_json::to_string_pretty(&value).map_err(ClickUpError::from)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ApiVersion;
    use crate::core::clickup::mock::{RecordingGateway, api_error};
    use serde_json::json;

    #[test]
    fn parses_every_template() {
        assert_eq!(ResourceRoute::parse("clickup://teams"), Some(ResourceRoute::Teams));
        assert_eq!(
            ResourceRoute::parse("clickup://teams/7/spaces"),
            Some(ResourceRoute::Spaces {
                team_id: "7".to_string()
            })
        );
        assert_eq!(
            ResourceRoute::parse("clickup://spaces/s1/folders"),
            Some(ResourceRoute::Folders {
                space_id: "s1".to_string()
            })
        );
        assert_eq!(
            ResourceRoute::parse("clickup://folders/f1/lists"),
            Some(ResourceRoute::Lists {
                folder_id: "f1".to_string()
            })
        );
        assert_eq!(
            ResourceRoute::parse("clickup://lists/l1/tasks"),
            Some(ResourceRoute::Tasks {
                list_id: "l1".to_string()
            })
        );
        assert_eq!(
            ResourceRoute::parse("clickup://tasks/t1"),
            Some(ResourceRoute::Task {
                task_id: "t1".to_string()
            })
        );
        assert_eq!(
            ResourceRoute::parse("clickup://teams/7/docs/d1"),
            Some(ResourceRoute::Document {
                team_id: "7".to_string(),
                doc_id: "d1".to_string()
            })
        );
    }

    #[test]
    fn rejects_unknown_uris() {
        for uri in [
            "clickup://",
            "clickup://teams/",
            "clickup://teams//spaces",
            "clickup://boards/1",
            "clickup://tasks/t1/comments",
            "https://teams",
        ] {
            assert_eq!(ResourceRoute::parse(uri), None, "{uri}");
        }
    }

    #[test]
    fn segments_are_percent_decoded() {
        assert_eq!(
            ResourceRoute::parse("clickup://tasks/CU%2D1"),
            Some(ResourceRoute::Task {
                task_id: "CU-1".to_string()
            })
        );
    }

    #[test]
    fn templates_cover_parameterised_routes() {
        let templates: Vec<String> = templates()
            .into_iter()
            .filter_map(|resource| resource.uri_template)
            .collect();
        assert_eq!(templates.len(), 6);
        assert!(templates.contains(&"clickup://teams/{teamId}/docs/{docId}".to_string()));
        assert_eq!(list()[0].uri.as_deref(), Some("clickup://teams"));
    }

    #[tokio::test]
    async fn read_returns_pretty_json_with_uri() {
        let gateway = RecordingGateway::returning(json!({ "tasks": [{ "id": "t1" }] }));

        let contents = read(&gateway, "clickup://lists/l1/tasks").await.unwrap();

        assert_eq!(contents.uri, "clickup://lists/l1/tasks");
        assert_eq!(contents.mime_type, "application/json");
        let parsed: Value = serde_json::from_str(&contents.text).unwrap();
        assert_eq!(parsed, json!([{ "id": "t1" }]));
        assert_eq!(gateway.last_call().path, "/list/l1/task");
    }

    #[tokio::test]
    async fn document_resource_uses_v3() {
        let gateway = RecordingGateway::returning(json!({ "id": "d1" }));

        read(&gateway, "clickup://teams/7/docs/d1").await.unwrap();

        let call = gateway.last_call();
        assert_eq!(call.path, "/workspaces/7/docs/d1");
        assert_eq!(call.version, ApiVersion::V3);
    }

    #[tokio::test]
    async fn unknown_uri_is_not_found_without_request() {
        let gateway = RecordingGateway::returning(json!({}));

        let err = read(&gateway, "clickup://boards").await.unwrap_err();

        assert_eq!(err.code(), RESOURCE_NOT_FOUND);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_internal_error() {
        let gateway = RecordingGateway::with(|_| Err(api_error(500, "boom")));

        let err = read(&gateway, "clickup://tasks/t1").await.unwrap_err();

        assert_eq!(err.code(), INTERNAL_ERROR);
        assert_eq!(err.to_string(), "ClickUp API error (500): boom");
    }
}
