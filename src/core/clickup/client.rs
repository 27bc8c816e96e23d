//! HTTP gateway to the ClickUp REST API.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::core::error::{ClickUpError, Result};

/// Default root of the legacy v2 API.
pub const DEFAULT_V2_URL: &str = "https://api.clickup.com/api/v2";

/// Default root of the v3 API (docs, pages, audit logs).
pub const DEFAULT_V3_URL: &str = "https://api.clickup.com/api/v3";

/// ClickUp API version a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V2,
    V3,
}

/// Issues a single request against ClickUp and normalizes the response.
///
/// `path` is relative to the version root and may carry a query string.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
        version: ApiVersion,
    ) -> Result<Value>;
}

/// reqwest-backed [`Gateway`].
///
/// Holds only immutable state, so one instance can be shared by every
/// concurrently running tool call.
#[derive(Debug, Clone)]
pub struct ClickUpClient {
    http: reqwest::Client,
    api_key: String,
    v2_url: String,
    v3_url: String,
}

impl ClickUpClient {
    /// Create a client against the public ClickUp API.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClickUpError::ApiKeyMissing);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            v2_url: DEFAULT_V2_URL.to_string(),
            v3_url: DEFAULT_V3_URL.to_string(),
        })
    }

    /// Point the client at different version roots.
    #[must_use]
    pub fn with_base_urls(mut self, v2_url: impl Into<String>, v3_url: impl Into<String>) -> Self {
        self.v2_url = v2_url.into().trim_end_matches('/').to_string();
        self.v3_url = v3_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Root URL for an API version.
    #[must_use]
    pub fn base_url(&self, version: ApiVersion) -> &str {
        match version {
            ApiVersion::V2 => &self.v2_url,
            ApiVersion::V3 => &self.v3_url,
        }
    }

    fn headers(&self, with_body: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.api_key).map_err(|_| ClickUpError::ApiKeyInvalid)?,
        );
        if with_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

#[async_trait]
impl Gateway for ClickUpClient {
    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
        version: ApiVersion,
    ) -> Result<Value> {
        let url = format!("{}{path}", self.base_url(version));
        tracing::debug!(method = %method, ?version, path = %path, "ClickUp request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(self.headers(body.is_some())?);
        if let Some(body) = &body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path = %path, "ClickUp request failed");
            return Err(ClickUpError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        normalize_body(&method, text)
    }
}

/// Turn a successful response body into JSON.
///
/// ClickUp answers some mutations with no content; those become
/// `{"success": true}` for PUT and DELETE and `{}` otherwise.
pub fn normalize_body(method: &Method, text: String) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(if *method == Method::PUT || *method == Method::DELETE {
            serde_json::json!({ "success": true })
        } else {
            serde_json::json!({})
        });
    }

    serde_json::from_str(&text).map_err(|_| ClickUpError::MalformedResponse(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ClickUpClient {
        ClickUpClient::new("pk_test")
            .unwrap()
            .with_base_urls(format!("{}/api/v2", server.uri()), format!("{}/api/v3", server.uri()))
    }

    #[test]
    fn client_requires_api_key() {
        assert!(matches!(
            ClickUpClient::new("  "),
            Err(ClickUpError::ApiKeyMissing)
        ));
    }

    #[test]
    fn control_characters_in_key_are_invalid_not_missing() {
        let client = ClickUpClient::new("pk_1\u{7}23").unwrap();

        let err = client.headers(false).unwrap_err();

        assert!(matches!(err, ClickUpError::ApiKeyInvalid));
        assert!(err.to_string().contains("not allowed in a header"));
    }

    #[test]
    fn base_urls_default_to_public_api() {
        let client = ClickUpClient::new("pk_test").unwrap();
        assert_eq!(client.base_url(ApiVersion::V2), DEFAULT_V2_URL);
        assert_eq!(client.base_url(ApiVersion::V3), DEFAULT_V3_URL);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_urls() {
        let client = ClickUpClient::new("pk_test")
            .unwrap()
            .with_base_urls("http://localhost/v2/", "http://localhost/v3/");
        assert_eq!(client.base_url(ApiVersion::V2), "http://localhost/v2");
        assert_eq!(client.base_url(ApiVersion::V3), "http://localhost/v3");
    }

    #[test]
    fn empty_body_on_mutation_means_success() {
        assert_eq!(
            normalize_body(&Method::PUT, String::new()).unwrap(),
            json!({ "success": true })
        );
        assert_eq!(
            normalize_body(&Method::DELETE, "  ".to_string()).unwrap(),
            json!({ "success": true })
        );
    }

    #[test]
    fn empty_body_on_read_is_empty_object() {
        assert_eq!(normalize_body(&Method::GET, String::new()).unwrap(), json!({}));
        assert_eq!(normalize_body(&Method::POST, String::new()).unwrap(), json!({}));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = normalize_body(&Method::GET, "<html>".to_string()).unwrap_err();
        assert!(matches!(err, ClickUpError::MalformedResponse(text) if text == "<html>"));
    }

    #[tokio::test]
    async fn get_sends_authorization_without_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/team"))
            .and(header("Authorization", "pk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "teams": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let value = client
            .request("/team", Method::GET, None, ApiVersion::V2)
            .await
            .unwrap();

        assert_eq!(value, json!({ "teams": [] }));
        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn post_serializes_body_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/workspaces/9/docs"))
            .and(header_exists("Authorization"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "name": "Spec" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "d1" })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let value = client
            .request(
                "/workspaces/9/docs",
                Method::POST,
                Some(json!({ "name": "Spec" })),
                ApiVersion::V3,
            )
            .await
            .unwrap();

        assert_eq!(value, json!({ "id": "d1" }));
    }

    #[tokio::test]
    async fn query_string_in_path_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/space/s1/folder"))
            .and(query_param("archived", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "folders": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let value = client
            .request("/space/s1/folder?archived=false", Method::GET, None, ApiVersion::V2)
            .await
            .unwrap();

        assert_eq!(value, json!({ "folders": [] }));
    }

    #[tokio::test]
    async fn delete_with_no_content_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/task/t1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let value = client
            .request("/task/t1", Method::DELETE, None, ApiVersion::V2)
            .await
            .unwrap();

        assert_eq!(value, json!({ "success": true }));
    }

    #[tokio::test]
    async fn error_status_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/task/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"err":"Task not found"}"#))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .request("/task/missing", Method::GET, None, ApiVersion::V2)
            .await
            .unwrap_err();

        match err {
            ClickUpError::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"err":"Task not found"}"#);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_request_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v2/task/t1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client
            .request("/task/t1", Method::PUT, Some(json!({})), ApiVersion::V2)
            .await;

        assert!(matches!(result, Err(ClickUpError::Api { status: 500, .. })));
    }
}
