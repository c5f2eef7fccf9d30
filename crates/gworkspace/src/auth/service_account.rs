//! Google Service Account Authenticator
//!
//! Implements the OAuth2 JWT bearer grant for service accounts, with optional
//! domain-wide delegation through the connection's `subject_email`.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{Authenticator, BearerToken};
use crate::common::{create_http_client_with_timeout, WorkspaceError, WorkspaceResult, DEFAULT_TIMEOUT};
use crate::config::{ConnectionDescriptor, CredentialSource};

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a service-account JSON key this crate uses
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    TOKEN_ENDPOINT.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> WorkspaceResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            WorkspaceError::authentication(format!("Invalid service account key: {}", e))
        })
    }

    /// Read the key named by a connection's credential source
    pub async fn load(source: &CredentialSource) -> WorkspaceResult<Self> {
        match source {
            CredentialSource::InlineKey(json) => Self::from_json(json),
            CredentialSource::KeyFile(path) => {
                let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                    WorkspaceError::authentication(format!(
                        "Failed to read service account key {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_json(&json)
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<&'a str>,
}

/// Service-account authenticator
pub struct ServiceAccountAuthenticator {
    http: reqwest::Client,
}

impl ServiceAccountAuthenticator {
    pub fn new() -> WorkspaceResult<Self> {
        Ok(Self {
            http: create_http_client_with_timeout(DEFAULT_TIMEOUT)?,
        })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build the signed JWT assertion for a connection
    pub fn assertion(
        key: &ServiceAccountKey,
        connection: &ConnectionDescriptor,
    ) -> WorkspaceResult<String> {
        let now = Utc::now();
        let claims = Claims {
            iss: &key.client_email,
            scope: connection.api_scopes.join(" "),
            aud: &key.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
            sub: connection.subject_email.as_deref(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = key.private_key_id.clone();

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            WorkspaceError::authentication(format!("Invalid service account private key: {}", e))
        })?;

        jsonwebtoken::encode(&header, &claims, &encoding_key).map_err(|e| {
            WorkspaceError::authentication(format!("Failed to sign JWT assertion: {}", e))
        })
    }

    async fn post_assertion(&self, token_uri: &str, assertion: &str) -> WorkspaceResult<String> {
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)];

        let response = self
            .http
            .post(token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| WorkspaceError::authentication(format!("Token request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WorkspaceError::authentication(format!("Failed to read token response: {}", e)))?;

        if !status.is_success() {
            error!("Token endpoint returned HTTP {}", status);
            return Err(match parse_token_response(&body) {
                Err(err) => err,
                Ok(_) => WorkspaceError::authentication(format!("HTTP {} error: {}", status, body)),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl Authenticator for ServiceAccountAuthenticator {
    async fn authenticate(&self, connection: &ConnectionDescriptor) -> WorkspaceResult<BearerToken> {
        info!(
            connection_key = connection.display_key(),
            "Authenticating Google service account"
        );

        let key = ServiceAccountKey::load(&connection.credential_source).await?;
        debug!(client_email = %key.client_email, "Loaded service account key");

        let assertion = Self::assertion(&key, connection)?;
        let body = self.post_assertion(&key.token_uri, &assertion).await?;
        parse_token_response(&body)
    }
}

/// Parse a Google OAuth2 token response.
fn parse_token_response(body: &str) -> WorkspaceResult<BearerToken> {
    let parsed: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| WorkspaceError::authentication(format!("Invalid JSON response: {}", e)))?;

    if let Some(err) = parsed.get("error").and_then(|v| v.as_str()) {
        let desc = parsed
            .get("error_description")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        return Err(WorkspaceError::authentication(format!("{}: {}", err, desc)));
    }

    let access_token = parsed
        .get("access_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| WorkspaceError::authentication("Missing access_token in response"))?;

    let expires_in = parsed
        .get("expires_in")
        .and_then(|v| v.as_i64())
        .unwrap_or(ASSERTION_LIFETIME_SECS);

    Ok(BearerToken::new(access_token).with_expiry(Utc::now() + Duration::seconds(expires_in)))
}
