//! HTTP Transport
//!
//! The dispatcher hands fully-prepared requests to a `Transport`. Non-2xx
//! responses are returned as-is; only failures below HTTP are errors.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::request::HttpRequest;
use crate::common::{create_http_client, WorkspaceResult};

/// Raw HTTP response, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// One entry per header value, in received order
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string()).with_header("content-type", "application/json")
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Parsed body. Empty, `null` and non-JSON bodies yield `None`.
    pub fn parsed_body(&self) -> Option<Value> {
        if self.body.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(&self.body) {
            Ok(Value::Null) | Err(_) => None,
            Ok(value) => Some(value),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> WorkspaceResult<RawResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> WorkspaceResult<Self> {
        Ok(Self {
            client: create_http_client()?,
        })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> WorkspaceResult<RawResponse> {
        debug!(method = %request.method, url = %request.url, "Executing Google API request");

        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response.text().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parsed_body() {
        assert_eq!(
            RawResponse::new(200, r#"{"id":"abc"}"#).parsed_body(),
            Some(json!({"id": "abc"}))
        );
        assert_eq!(RawResponse::new(204, "").parsed_body(), None);
        assert_eq!(RawResponse::new(200, "null").parsed_body(), None);
        assert_eq!(RawResponse::new(502, "<html>Bad Gateway</html>").parsed_body(), None);
    }
}
