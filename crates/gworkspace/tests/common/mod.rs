//! Shared helpers for the gworkspace integration tests.

#![allow(dead_code)]

use gworkspace::{ApiClient, ClientOptions, JsonConfigSource, StaticTokenAuthenticator};
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_TOKEN: &str = "ya29.test-token";

/// Configuration tree with the `test` connection as default
pub fn test_config() -> Value {
    json!({
        "default": {"connection": "test"},
        "connections": {
            "test": {
                "api_scopes": ["s1"],
                "customer_id": "cust1",
                "domain": "dom1",
                "json_key_file_path": "/k.json"
            }
        }
    })
}

/// Client for the `test` connection on the real reqwest transport
pub fn test_client(options: ClientOptions) -> ApiClient {
    ApiClient::builder()
        .connection("test")
        .config_source(Arc::new(JsonConfigSource::new(test_config())))
        .authenticator(Arc::new(StaticTokenAuthenticator::new(TEST_TOKEN)))
        .options(options)
        .build()
        .expect("test connection resolves")
}

/// Directory-style list page
pub fn users_page(emails: &[&str], next_page_token: Option<&str>) -> Value {
    let mut page = json!({
        "kind": "admin#directory#users",
        "etag": "\"etag\"",
        "users": emails
            .iter()
            .map(|email| json!({"primaryEmail": email}))
            .collect::<Vec<_>>()
    });
    if let Some(token) = next_page_token {
        page["nextPageToken"] = json!(token);
    }
    page
}
