use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{integer, object, parse, pretty, respond, string, strings, tool};
use crate::core::clickup::document;
use crate::core::clickup::types::{CreateDocumentParams, CreatePageParams, EditPageParams};
use crate::core::{Gateway, Result};
use crate::server::protocol::{McpTool, McpToolResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchArgs {
    team_id: String,
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentArgs {
    team_id: String,
    #[serde(flatten)]
    params: CreateDocumentParams,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentArgs {
    team_id: String,
    document_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePageArgs {
    team_id: String,
    document_id: String,
    #[serde(flatten)]
    params: CreatePageParams,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageArgs {
    team_id: String,
    document_id: String,
    page_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditPageArgs {
    team_id: String,
    document_id: String,
    page_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditLogArgs {
    team_id: String,
    /// Everything else is the log entry.
    #[serde(flatten)]
    entry: Map<String, Value>,
}

fn doc_ids() -> Value {
    json!({
        "teamId": string("Workspace (team) id"),
        "documentId": string("Document id"),
    })
}

fn with(mut base: Value, key: &str, schema: Value) -> Value {
    if let Some(map) = base.as_object_mut() {
        map.insert(key.to_string(), schema);
    }
    base
}

pub(super) fn definitions() -> Vec<McpTool> {
    let page_ids = with(doc_ids(), "pageId", string("Page id"));

    vec![
        tool(
            "search-documents",
            "Search the docs of a workspace, optionally by text.",
            object(
                json!({
                    "teamId": string("Workspace (team) id"),
                    "query": string("Search text"),
                }),
                &["teamId"],
            ),
        ),
        tool(
            "create-document",
            "Create a doc in a workspace.",
            object(
                json!({
                    "teamId": string("Workspace (team) id"),
                    "name": string("Document name"),
                    "content": string("Initial content"),
                    "assignees": strings("Assignee user ids"),
                    "tags": strings("Tag names"),
                    "status": string("Status"),
                    "priority": integer("Priority"),
                }),
                &["teamId", "name"],
            ),
        ),
        tool(
            "get-document",
            "Get a single doc.",
            object(doc_ids(), &["teamId", "documentId"]),
        ),
        tool(
            "get-doc-pages",
            "List the pages of a doc.",
            object(doc_ids(), &["teamId", "documentId"]),
        ),
        tool(
            "create-page",
            "Add a page to a doc.",
            object(
                with(
                    with(
                        with(doc_ids(), "title", string("Page title")),
                        "content",
                        string("Page content"),
                    ),
                    "parent",
                    string("Parent page id"),
                ),
                &["teamId", "documentId", "title"],
            ),
        ),
        tool(
            "get-page",
            "Get a single page of a doc.",
            object(page_ids.clone(), &["teamId", "documentId", "pageId"]),
        ),
        tool(
            "edit-page",
            "Change the title or content of a page.",
            object(
                with(
                    with(page_ids, "title", string("New title")),
                    "content",
                    string("New content"),
                ),
                &["teamId", "documentId", "pageId"],
            ),
        ),
        tool(
            "create-audit-log",
            "Write a workspace audit log entry (Enterprise plans only). Fields besides teamId form the entry.",
            json!({
                "type": "object",
                "properties": { "teamId": string("Workspace (team) id") },
                "required": ["teamId"],
                "additionalProperties": true,
            }),
        ),
    ]
}

pub(super) async fn call<G: Gateway + ?Sized>(
    gateway: &G,
    name: &str,
    args: &Value,
) -> Option<McpToolResult> {
    let result = match name {
        "search-documents" => respond("searching documents", search(gateway, args).await),
        "create-document" => respond("creating document", create_document(gateway, args).await),
        "get-document" => respond("getting document", get_document(gateway, args).await),
        "get-doc-pages" => respond("getting document pages", get_doc_pages(gateway, args).await),
        "create-page" => respond("creating page", create_page(gateway, args).await),
        "get-page" => respond("getting page", get_page(gateway, args).await),
        "edit-page" => respond("editing page", edit_page(gateway, args).await),
        "create-audit-log" => respond("creating audit log", create_audit_log(gateway, args).await),
        _ => return None,
    };
    Some(result)
}

async fn search<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: SearchArgs = parse(args)?;
    pretty(&document::search_docs(gateway, &args.team_id, args.query.as_deref()).await?)
}

async fn create_document<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: CreateDocumentArgs = parse(args)?;
    pretty(&document::create_document(gateway, &args.team_id, &args.params).await?)
}

async fn get_document<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: DocumentArgs = parse(args)?;
    pretty(&document::get_document(gateway, &args.team_id, &args.document_id).await?)
}

async fn get_doc_pages<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: DocumentArgs = parse(args)?;
    pretty(&document::get_doc_pages(gateway, &args.team_id, &args.document_id).await?)
}

async fn create_page<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: CreatePageArgs = parse(args)?;
    pretty(
        &document::create_page(gateway, &args.team_id, &args.document_id, &args.params).await?,
    )
}

async fn get_page<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: PageArgs = parse(args)?;
    pretty(
        &document::get_page(gateway, &args.team_id, &args.document_id, &args.page_id).await?,
    )
}

async fn edit_page<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: EditPageArgs = parse(args)?;
    let params = EditPageParams {
        title: args.title,
        content: args.content,
    };
    pretty(
        &document::edit_page(
            gateway,
            &args.team_id,
            &args.document_id,
            &args.page_id,
            &params,
        )
        .await?,
    )
}

async fn create_audit_log<G: Gateway + ?Sized>(gateway: &G, args: &Value) -> Result<String> {
    let args: AuditLogArgs = parse(args)?;
    let entry = Value::Object(args.entry);
    pretty(&document::create_audit_log(gateway, &args.team_id, &entry).await?)
}
