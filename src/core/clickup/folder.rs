//! Folders within a space.

use reqwest::Method;
use serde_json::Value;

use super::client::{ApiVersion, Gateway};
use super::segment;
use super::types::{
    CreateFolderFromTemplateOptions, FolderParams, FoldersEnvelope, unwrap_envelope,
};
use crate::core::error::Result;

/// List the folders of a space, optionally filtered by archive state.
pub async fn get_folders<G: Gateway + ?Sized>(
    gateway: &G,
    space_id: &str,
    archived: Option<bool>,
) -> Result<Vec<Value>> {
    let mut path = format!("/space/{}/folder", segment(space_id));
    if let Some(archived) = archived {
        path.push_str(&format!("?archived={archived}"));
    }

    let response = gateway
        .request(&path, Method::GET, None, ApiVersion::V2)
        .await?;
    let envelope: FoldersEnvelope = unwrap_envelope(response)?;
    Ok(envelope.folders)
}

pub async fn create_folder<G: Gateway + ?Sized>(
    gateway: &G,
    space_id: &str,
    params: &FolderParams,
) -> Result<Value> {
    gateway
        .request(
            &format!("/space/{}/folder", segment(space_id)),
            Method::POST,
            Some(serde_json::to_value(params)?),
            ApiVersion::V2,
        )
        .await
}

pub async fn get_folder<G: Gateway + ?Sized>(gateway: &G, folder_id: &str) -> Result<Value> {
    gateway
        .request(
            &format!("/folder/{}", segment(folder_id)),
            Method::GET,
            None,
            ApiVersion::V2,
        )
        .await
}

/// Rename a folder.
pub async fn update_folder<G: Gateway + ?Sized>(
    gateway: &G,
    folder_id: &str,
    params: &FolderParams,
) -> Result<Value> {
    gateway
        .request(
            &format!("/folder/{}", segment(folder_id)),
            Method::PUT,
            Some(serde_json::to_value(params)?),
            ApiVersion::V2,
        )
        .await
}

pub async fn delete_folder<G: Gateway + ?Sized>(gateway: &G, folder_id: &str) -> Result<Value> {
    gateway
        .request(
            &format!("/folder/{}", segment(folder_id)),
            Method::DELETE,
            None,
            ApiVersion::V2,
        )
        .await
}

/// Instantiate a folder template inside a space.
pub async fn create_folder_from_template<G: Gateway + ?Sized>(
    gateway: &G,
    space_id: &str,
    template_id: &str,
    options: &CreateFolderFromTemplateOptions,
) -> Result<Value> {
    gateway
        .request(
            &format!(
                "/space/{}/folder/template/{}",
                segment(space_id),
                segment(template_id)
            ),
            Method::POST,
            Some(serde_json::to_value(options)?),
            ApiVersion::V2,
        )
        .await
}
