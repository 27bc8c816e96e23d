//! In-memory gateway that records calls and replays canned responses.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::client::{ApiVersion, Gateway};
use crate::core::error::{ClickUpError, Result};

/// A request seen by [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
    pub version: ApiVersion,
}

type Responder = Box<dyn Fn(&RecordedCall) -> Result<Value> + Send + Sync>;

pub struct RecordingGateway {
    calls: Mutex<Vec<RecordedCall>>,
    responder: Responder,
}

impl RecordingGateway {
    /// Answer every request with `response`.
    pub fn returning(response: Value) -> Self {
        Self::with(move |_| Ok(response.clone()))
    }

    /// Answer through a closure.
    pub fn with(responder: impl Fn(&RecordedCall) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no request recorded")
    }
}

/// Shorthand for a ClickUp error response.
pub fn api_error(status: u16, body: &str) -> ClickUpError {
    ClickUpError::Api {
        status,
        body: body.to_string(),
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
        version: ApiVersion,
    ) -> Result<Value> {
        let call = RecordedCall {
            path: path.to_string(),
            method,
            body,
            version,
        };
        let response = (self.responder)(&call);
        self.calls.lock().unwrap().push(call);
        response
    }
}
