//! Teams (workspaces).

use reqwest::Method;
use serde_json::Value;

use super::client::{ApiVersion, Gateway};
use super::types::{TeamsEnvelope, unwrap_envelope};
use crate::core::error::Result;

/// List the teams the API key can access.
pub async fn get_teams<G: Gateway + ?Sized>(gateway: &G) -> Result<Vec<Value>> {
    let response = gateway
        .request("/team", Method::GET, None, ApiVersion::V2)
        .await?;
    let envelope: TeamsEnvelope = unwrap_envelope(response)?;
    Ok(envelope.teams)
}
