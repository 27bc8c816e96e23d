//! Spaces within a team.

use reqwest::Method;
use serde_json::Value;

use super::client::{ApiVersion, Gateway};
use super::segment;
use super::types::{CreateSpaceParams, SpacesEnvelope, UpdateSpaceParams, unwrap_envelope};
use crate::core::error::Result;

/// Create a space in a team.
pub async fn create_space<G: Gateway + ?Sized>(
    gateway: &G,
    team_id: &str,
    params: &CreateSpaceParams,
) -> Result<Value> {
    gateway
        .request(
            &format!("/team/{}/space", segment(team_id)),
            Method::POST,
            Some(serde_json::to_value(params)?),
            ApiVersion::V2,
        )
        .await
}

/// List the spaces of a team.
pub async fn get_spaces<G: Gateway + ?Sized>(gateway: &G, team_id: &str) -> Result<Vec<Value>> {
    let response = gateway
        .request(
            &format!("/team/{}/space", segment(team_id)),
            Method::GET,
            None,
            ApiVersion::V2,
        )
        .await?;
    let envelope: SpacesEnvelope = unwrap_envelope(response)?;
    Ok(envelope.spaces)
}

/// Fetch one space.
pub async fn get_space<G: Gateway + ?Sized>(gateway: &G, space_id: &str) -> Result<Value> {
    gateway
        .request(
            &format!("/space/{}", segment(space_id)),
            Method::GET,
            None,
            ApiVersion::V2,
        )
        .await
}

pub async fn update_space<G: Gateway + ?Sized>(
    gateway: &G,
    space_id: &str,
    params: &UpdateSpaceParams,
) -> Result<Value> {
    gateway
        .request(
            &format!("/space/{}", segment(space_id)),
            Method::PUT,
            Some(serde_json::to_value(params)?),
            ApiVersion::V2,
        )
        .await
}

pub async fn delete_space<G: Gateway + ?Sized>(gateway: &G, space_id: &str) -> Result<Value> {
    gateway
        .request(
            &format!("/space/{}", segment(space_id)),
            Method::DELETE,
            None,
            ApiVersion::V2,
        )
        .await
}
