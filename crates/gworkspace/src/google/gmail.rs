//! Gmail API v1
//!
//! No connection parameters beyond the bearer token.

use super::client::GoogleClient;
use super::request::RequiredParameters;

const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";

pub struct Gmail {
    client: GoogleClient,
    base_url: String,
}

super::google_api_wrapper!(Gmail, GMAIL_API_BASE, RequiredParameters::None);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::client::tests::{client, MockTransport};
    use crate::google::request::params;
    use crate::google::transport::RawResponse;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_sends_only_caller_params() {
        let transport = Arc::new(MockTransport::new(vec![RawResponse::json(
            200,
            &json!({"messages": [{"id": "m1", "threadId": "t1"}], "resultSizeEstimate": 1}),
        )]));
        let gmail = Gmail::new(client(transport.clone()));

        let envelope = gmail
            .get("/users/me/messages", params(json!({"q": "is:unread"})))
            .await
            .unwrap();
        assert_eq!(envelope.array("messages").len(), 1);

        let request = &transport.requests()[0];
        assert_eq!(request.url, "https://gmail.googleapis.com/gmail/v1/users/me/messages");
        assert_eq!(request.query, vec![("q".to_string(), "is:unread".to_string())]);
    }

    #[tokio::test]
    async fn test_post_body_has_no_connection_fields() {
        let transport = Arc::new(MockTransport::new(vec![RawResponse::json(200, &json!({"id": "m2"}))]));
        let gmail = Gmail::new(client(transport.clone()));

        gmail
            .post("/users/me/messages/send", params(json!({"raw": "VG86IGFAYg"})))
            .await
            .unwrap();

        assert_eq!(transport.requests()[0].body, Some(json!({"raw": "VG86IGFAYg"})));
    }
}
