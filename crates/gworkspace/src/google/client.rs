//! Google API Authenticated HTTP Client
//!
//! Dispatches one verb call with the connection's bearer token, follows
//! `nextPageToken` pagination on GET, normalizes the result into a
//! `ResponseEnvelope` and logs it.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::logger::{ResponseLogger, TracingLogger};
use super::pagination::{self, PageOutcome, PaginationWalker};
use super::request::{to_query, HttpRequest, Method, Params, RequiredParameters};
use super::response::{normalize, ResponseEnvelope};
use super::transport::{RawResponse, ReqwestTransport, Transport};
use crate::auth::BearerToken;
use crate::common::{WorkspaceResult, DEFAULT_TIMEOUT, USER_AGENT};
use crate::config::ConnectionDescriptor;

/// Default ceiling on pages fetched by one GET
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Per-client behaviour shared by every facade it creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Passed through to the transport on every request
    pub timeout: Duration,
    /// `None` follows `nextPageToken` without limit
    pub max_pages: Option<usize>,
    /// Return `WorkspaceError::Api` instead of a failed envelope
    pub raise_on_failure: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_pages: Some(DEFAULT_MAX_PAGES),
            raise_on_failure: false,
        }
    }
}

/// Resolved connection plus the token obtained for it
#[derive(Debug, Clone)]
pub struct ConnectionContext {
    pub connection: ConnectionDescriptor,
    pub token: BearerToken,
}

/// Google API HTTP client with OAuth token injection
#[derive(Clone)]
pub struct GoogleClient {
    context: Arc<ConnectionContext>,
    transport: Arc<dyn Transport>,
    logger: Arc<dyn ResponseLogger>,
    options: ClientOptions,
}

impl GoogleClient {
    /// Create a client on the default `reqwest` transport
    pub fn new(connection: ConnectionDescriptor, token: BearerToken) -> WorkspaceResult<Self> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(
            Arc::new(ConnectionContext { connection, token }),
            transport,
        ))
    }

    pub fn with_transport(context: Arc<ConnectionContext>, transport: Arc<dyn Transport>) -> Self {
        Self {
            context,
            transport,
            logger: Arc::new(TracingLogger),
            options: ClientOptions::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ResponseLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn connection(&self) -> &ConnectionDescriptor {
        &self.context.connection
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Issue one HTTP call. Non-2xx responses are returned, not raised.
    pub async fn dispatch(&self, method: Method, url: &str, params: &Params) -> WorkspaceResult<RawResponse> {
        let (query, body) = if method.uses_query() {
            (to_query(params), None)
        } else {
            (Vec::new(), Some(serde_json::Value::Object(params.clone())))
        };

        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.context.token.as_str()),
                ),
                ("User-Agent".to_string(), USER_AGENT.clone()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            query,
            body,
            timeout: Some(self.options.timeout),
        };

        self.transport.send(request).await
    }

    /// Full verb pipeline: merge required parameters, dispatch, paginate
    /// (GET only), normalize, log.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        mut params: Params,
        required: RequiredParameters,
    ) -> WorkspaceResult<ResponseEnvelope> {
        required.apply(&self.context.connection, &mut params);

        let raw = self.dispatch(method, url, &params).await?;

        let envelope = match raw.parsed_body() {
            Some(first) if method == Method::Get && pagination::is_paginated(&first) => {
                debug!(url, "Response is paginated, collecting remaining pages");
                let walker = PaginationWalker::new(self, self.options.max_pages);
                match walker.collect(url, &params, first).await? {
                    PageOutcome::Complete(aggregate) => normalize(&raw, Some(aggregate)),
                    PageOutcome::Failed(failed) => normalize(&failed, None),
                }
            }
            _ => normalize(&raw, None),
        };

        self.logger
            .log_response(&self.context.connection, method, url, &envelope);

        if self.options.raise_on_failure {
            return envelope.error_for_status(method);
        }
        Ok(envelope)
    }

    pub async fn get(&self, url: &str, params: Params) -> WorkspaceResult<ResponseEnvelope> {
        self.execute(Method::Get, url, params, RequiredParameters::None).await
    }

    pub async fn post(&self, url: &str, params: Params) -> WorkspaceResult<ResponseEnvelope> {
        self.execute(Method::Post, url, params, RequiredParameters::None).await
    }

    pub async fn put(&self, url: &str, params: Params) -> WorkspaceResult<ResponseEnvelope> {
        self.execute(Method::Put, url, params, RequiredParameters::None).await
    }

    pub async fn patch(&self, url: &str, params: Params) -> WorkspaceResult<ResponseEnvelope> {
        self.execute(Method::Patch, url, params, RequiredParameters::None).await
    }

    pub async fn delete(&self, url: &str, params: Params) -> WorkspaceResult<ResponseEnvelope> {
        self.execute(Method::Delete, url, params, RequiredParameters::None).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::common::WorkspaceError;
    use crate::config::CredentialSource;
    use crate::google::logger::tests::RecordingLogger;
    use crate::google::request::params;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every request
    #[derive(Default)]
    pub(crate) struct MockTransport {
        responses: Mutex<VecDeque<RawResponse>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub(crate) fn new(responses: Vec<RawResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: HttpRequest) -> WorkspaceResult<RawResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| WorkspaceError::transport("no canned response left"))
        }
    }

    pub(crate) fn connection() -> ConnectionDescriptor {
        ConnectionDescriptor {
            key: Some("test".into()),
            api_scopes: vec!["s1".into()],
            customer_id: "cust1".into(),
            domain: "dom1".into(),
            subject_email: None,
            credential_source: CredentialSource::KeyFile("/k.json".into()),
            log_channels: vec!["single".into()],
        }
    }

    pub(crate) fn client(transport: Arc<MockTransport>) -> GoogleClient {
        let context = Arc::new(ConnectionContext {
            connection: connection(),
            token: BearerToken::new("test-token"),
        });
        GoogleClient::with_transport(context, transport)
    }

    #[tokio::test]
    async fn test_get_uses_query_and_auth_headers() {
        let transport = Arc::new(MockTransport::new(vec![RawResponse::json(200, &json!({"id": "g1"}))]));
        let client = client(transport.clone());

        let envelope = client
            .get("https://example.test/groups", params(json!({"maxResults": 2})))
            .await
            .unwrap();
        assert_eq!(envelope.get("id"), Some(&json!("g1")));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.header("authorization"), Some("Bearer test-token"));
        assert!(request.header("user-agent").unwrap().starts_with("gworkspace/"));
        assert_eq!(request.query_value("maxResults"), Some("2"));
        assert!(request.body.is_none());
        assert_eq!(request.timeout, Some(DEFAULT_TIMEOUT));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let transport = Arc::new(MockTransport::new(vec![RawResponse::json(200, &json!({"id": "g2"}))]));
        let client = client(transport.clone());

        client
            .execute(
                Method::Post,
                "https://example.test/groups",
                params(json!({"email": "g2@dom1"})),
                RequiredParameters::DOMAIN_AND_CUSTOMER,
            )
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert!(request.query.is_empty());
        assert_eq!(
            request.body,
            Some(json!({"email": "g2@dom1", "domain": "dom1", "customer": "cust1"}))
        );
    }

    #[tokio::test]
    async fn test_failed_response_is_returned_not_raised() {
        let transport = Arc::new(MockTransport::new(vec![RawResponse::json(
            404,
            &json!({"error": {"code": 404, "message": "Resource Not Found: groupKey"}}),
        )]));
        let logger = Arc::new(RecordingLogger::default());
        let client = client(transport).with_logger(logger.clone());

        let envelope = client.get("https://example.test/groups/x", Params::new()).await.unwrap();
        assert!(envelope.status.client_error);
        assert!(envelope.status.failed);

        let events = logger.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "GET 404 https://example.test/groups/x");
    }

    #[tokio::test]
    async fn test_raise_on_failure() {
        let transport = Arc::new(MockTransport::new(vec![RawResponse::json(
            403,
            &json!({"error": {"code": 403, "message": "Not Authorized to access this resource/api"}}),
        )]));
        let client = client(transport).with_options(ClientOptions {
            raise_on_failure: true,
            ..ClientOptions::default()
        });

        let err = client.delete("https://example.test/groups/x", Params::new()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(403));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = client(Arc::new(MockTransport::default()));
        let err = client.get("https://example.test/", Params::new()).await.unwrap_err();
        assert!(matches!(err, WorkspaceError::Transport(_)));
    }
}
