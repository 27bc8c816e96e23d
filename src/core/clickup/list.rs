//! Lists within a folder.

use reqwest::Method;
use serde_json::Value;

use super::client::{ApiVersion, Gateway};
use super::segment;
use super::types::{CreateListParams, ListsEnvelope, unwrap_envelope};
use crate::core::error::Result;

pub async fn get_lists<G: Gateway + ?Sized>(gateway: &G, folder_id: &str) -> Result<Vec<Value>> {
    let response = gateway
        .request(
            &format!("/folder/{}/list", segment(folder_id)),
            Method::GET,
            None,
            ApiVersion::V2,
        )
        .await?;
    let envelope: ListsEnvelope = unwrap_envelope(response)?;
    Ok(envelope.lists)
}

pub async fn create_list<G: Gateway + ?Sized>(
    gateway: &G,
    folder_id: &str,
    params: &CreateListParams,
) -> Result<Value> {
    gateway
        .request(
            &format!("/folder/{}/list", segment(folder_id)),
            Method::POST,
            Some(serde_json::to_value(params)?),
            ApiVersion::V2,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clickup::mock::RecordingGateway;
    use crate::core::error::ClickUpError;
    use serde_json::json;

    #[tokio::test]
    async fn get_lists_unwraps_envelope() {
        let gateway = RecordingGateway::returning(json!({ "lists": [{ "id": "l1" }] }));

        let lists = get_lists(&gateway, "f1").await.unwrap();

        assert_eq!(lists, vec![json!({ "id": "l1" })]);
        assert_eq!(gateway.last_call().path, "/folder/f1/list");
    }

    #[tokio::test]
    async fn get_lists_rejects_unexpected_shape() {
        let gateway = RecordingGateway::returning(json!({ "lists": "nope" }));

        let err = get_lists(&gateway, "f1").await.unwrap_err();

        assert!(matches!(err, ClickUpError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn create_list_posts_body() {
        let gateway = RecordingGateway::returning(json!({ "id": "l2" }));
        let params = CreateListParams {
            name: "Backlog".to_string(),
            priority: Some(2),
            due_date: Some(1_735_689_600_000),
            ..Default::default()
        };

        create_list(&gateway, "f1", &params).await.unwrap();

        let call = gateway.last_call();
        assert_eq!(call.method, Method::POST);
        assert_eq!(
            call.body,
            Some(json!({ "name": "Backlog", "priority": 2, "due_date": 1_735_689_600_000_i64 }))
        );
    }
}
