//! Tasks within a list.

use reqwest::Method;
use serde_json::Value;

use super::client::{ApiVersion, Gateway};
use super::segment;
use super::types::{
    CreateTaskData, TasksEnvelope, UpdateTaskParams, UpdateTaskQuery, unwrap_envelope,
};
use crate::core::error::Result;

pub async fn get_tasks<G: Gateway + ?Sized>(gateway: &G, list_id: &str) -> Result<Vec<Value>> {
    let response = gateway
        .request(
            &format!("/list/{}/task", segment(list_id)),
            Method::GET,
            None,
            ApiVersion::V2,
        )
        .await?;
    let envelope: TasksEnvelope = unwrap_envelope(response)?;
    Ok(envelope.tasks)
}

pub async fn get_task<G: Gateway + ?Sized>(gateway: &G, task_id: &str) -> Result<Value> {
    gateway
        .request(
            &format!("/task/{}", segment(task_id)),
            Method::GET,
            None,
            ApiVersion::V2,
        )
        .await
}

/// Create a task in a list.
pub async fn create_task<G: Gateway + ?Sized>(
    gateway: &G,
    list_id: &str,
    data: &CreateTaskData,
) -> Result<Value> {
    gateway
        .request(
            &format!("/list/{}/task", segment(list_id)),
            Method::POST,
            Some(serde_json::to_value(data)?),
            ApiVersion::V2,
        )
        .await
}

/// Update a task.
///
/// With `custom_task_ids` the id is a custom task id and ClickUp also wants
/// `team_id`; a missing `team_id` is left for ClickUp to reject.
pub async fn update_task<G: Gateway + ?Sized>(
    gateway: &G,
    task_id: &str,
    params: &UpdateTaskParams,
    query: Option<UpdateTaskQuery>,
) -> Result<Value> {
    let query = query.map(|q| q.to_query_string()).unwrap_or_default();
    gateway
        .request(
            &format!("/task/{}{query}", segment(task_id)),
            Method::PUT,
            Some(serde_json::to_value(params)?),
            ApiVersion::V2,
        )
        .await
}

pub async fn delete_task<G: Gateway + ?Sized>(gateway: &G, task_id: &str) -> Result<Value> {
    gateway
        .request(
            &format!("/task/{}", segment(task_id)),
            Method::DELETE,
            None,
            ApiVersion::V2,
        )
        .await
}
