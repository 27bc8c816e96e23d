//! Docs, pages and audit logs (v3 API).

use reqwest::Method;
use serde_json::Value;

use super::client::{ApiVersion, Gateway};
use super::segment;
use super::types::{
    CreateDocumentParams, CreatePageParams, DocsEnvelope, EditPageParams, unwrap_envelope,
};
use crate::core::error::Result;

fn docs_path(workspace_id: &str) -> String {
    format!("/workspaces/{}/docs", segment(workspace_id))
}

fn pages_path(workspace_id: &str, doc_id: &str) -> String {
    format!("{}/{}/pages", docs_path(workspace_id), segment(doc_id))
}

/// Search the docs of a workspace, optionally by text.
pub async fn search_docs<G: Gateway + ?Sized>(
    gateway: &G,
    workspace_id: &str,
    query: Option<&str>,
) -> Result<Vec<Value>> {
    let mut path = docs_path(workspace_id);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        path.push_str("?search=");
        path.push_str(&urlencoding::encode(query));
    }

    let response = gateway
        .request(&path, Method::GET, None, ApiVersion::V3)
        .await?;
    let envelope: DocsEnvelope = unwrap_envelope(response)?;
    Ok(envelope.docs)
}

pub async fn create_document<G: Gateway + ?Sized>(
    gateway: &G,
    workspace_id: &str,
    params: &CreateDocumentParams,
) -> Result<Value> {
    gateway
        .request(
            &docs_path(workspace_id),
            Method::POST,
            Some(serde_json::to_value(params)?),
            ApiVersion::V3,
        )
        .await
}

pub async fn get_document<G: Gateway + ?Sized>(
    gateway: &G,
    workspace_id: &str,
    doc_id: &str,
) -> Result<Value> {
    gateway
        .request(
            &format!("{}/{}", docs_path(workspace_id), segment(doc_id)),
            Method::GET,
            None,
            ApiVersion::V3,
        )
        .await
}

/// Fetch the pages of a doc. The response is returned as ClickUp sends it.
pub async fn get_doc_pages<G: Gateway + ?Sized>(
    gateway: &G,
    workspace_id: &str,
    doc_id: &str,
) -> Result<Value> {
    gateway
        .request(
            &pages_path(workspace_id, doc_id),
            Method::GET,
            None,
            ApiVersion::V3,
        )
        .await
}

pub async fn create_page<G: Gateway + ?Sized>(
    gateway: &G,
    workspace_id: &str,
    doc_id: &str,
    params: &CreatePageParams,
) -> Result<Value> {
    gateway
        .request(
            &pages_path(workspace_id, doc_id),
            Method::POST,
            Some(serde_json::to_value(params)?),
            ApiVersion::V3,
        )
        .await
}

pub async fn get_page<G: Gateway + ?Sized>(
    gateway: &G,
    workspace_id: &str,
    doc_id: &str,
    page_id: &str,
) -> Result<Value> {
    gateway
        .request(
            &format!("{}/{}", pages_path(workspace_id, doc_id), segment(page_id)),
            Method::GET,
            None,
            ApiVersion::V3,
        )
        .await
}

pub async fn edit_page<G: Gateway + ?Sized>(
    gateway: &G,
    workspace_id: &str,
    doc_id: &str,
    page_id: &str,
    params: &EditPageParams,
) -> Result<Value> {
    gateway
        .request(
            &format!("{}/{}", pages_path(workspace_id, doc_id), segment(page_id)),
            Method::PUT,
            Some(serde_json::to_value(params)?),
            ApiVersion::V3,
        )
        .await
}

/// Write a workspace audit log entry (Enterprise plans only).
pub async fn create_audit_log<G: Gateway + ?Sized>(
    gateway: &G,
    workspace_id: &str,
    entry: &Value,
) -> Result<Value> {
    gateway
        .request(
            &format!("/workspaces/{}/auditlogs", segment(workspace_id)),
            Method::POST,
            Some(entry.clone()),
            ApiVersion::V3,
        )
        .await
}
