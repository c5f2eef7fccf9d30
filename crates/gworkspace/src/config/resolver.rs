//! Connection Resolver
//!
//! Turns a connection name or an inline configuration map into a validated
//! `ConnectionDescriptor`. Named and inline configuration share one set of
//! validation rules and messages.

use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use super::source::{ConfigSource, JsonConfigSource};
use super::types::{ConnectionDescriptor, CredentialSource, DEFAULT_LOG_CHANNEL};
use crate::common::{WorkspaceError, WorkspaceResult};
use crate::google::logger::{ResponseLogger, TracingLogger};

pub type ConfigMap = Map<String, Value>;

const CREDENTIALS_REQUIRED: &str =
    "Either the json_key_file_path or json_key parameters are required.";
const CREDENTIALS_EXCLUSIVE: &str =
    "Only one of the json_key_file_path or json_key parameters may be set.";

pub struct ConnectionResolver {
    source: Arc<dyn ConfigSource>,
    logger: Arc<dyn ResponseLogger>,
}

impl Default for ConnectionResolver {
    fn default() -> Self {
        Self::new(Arc::new(JsonConfigSource::empty()))
    }
}

impl ConnectionResolver {
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self {
            source,
            logger: Arc::new(TracingLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ResponseLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Resolve a connection.
    ///
    /// A non-empty `inline_config` wins and yields an unnamed descriptor.
    /// Otherwise `connection_key` (or `default.connection`) is looked up in
    /// the named configuration source.
    pub fn resolve(
        &self,
        connection_key: Option<&str>,
        inline_config: Option<&ConfigMap>,
    ) -> WorkspaceResult<ConnectionDescriptor> {
        if let Some(config) = inline_config.filter(|c| !c.is_empty()) {
            debug!("Resolving inline connection configuration");
            return validate_connection(None, config);
        }

        let key = match connection_key {
            Some(key) => key.to_string(),
            None => self.default_connection()?,
        };

        let config = match self.source.lookup(&["connections", key.as_str()]) {
            Some(Value::Object(map)) => map,
            _ => {
                let message = format!(
                    "The Google connection key `{}` is not defined in the connections configuration.",
                    key
                );
                self.logger.log_missing_configuration(Some(&key), &message);
                return Err(WorkspaceError::configuration(message));
            }
        };

        debug!(connection_key = %key, "Resolving named connection configuration");
        validate_connection(Some(key), config)
    }

    fn default_connection(&self) -> WorkspaceResult<String> {
        match self.source.lookup(&["default", "connection"]) {
            Some(Value::String(key)) if !key.is_empty() => Ok(key.clone()),
            _ => Err(WorkspaceError::configuration(
                "No default connection has been configured.",
            )),
        }
    }
}

/// Validate a connection map into a descriptor.
pub fn validate_connection(
    key: Option<String>,
    config: &ConfigMap,
) -> WorkspaceResult<ConnectionDescriptor> {
    let api_scopes = match string_array(config, "api_scopes")? {
        Some(scopes) if !scopes.is_empty() => scopes,
        _ => return Err(required("api_scopes")),
    };
    let customer_id = optional_string(config, "customer_id")?.ok_or_else(|| required("customer_id"))?;
    let domain = optional_string(config, "domain")?.ok_or_else(|| required("domain"))?;
    let subject_email = optional_string(config, "subject_email")?;

    let json_key_file_path = optional_string(config, "json_key_file_path")?;
    let json_key = optional_string(config, "json_key")?;
    let credential_source = match (json_key_file_path, json_key) {
        (Some(path), None) => CredentialSource::KeyFile(PathBuf::from(path)),
        (None, Some(key)) => CredentialSource::InlineKey(key),
        (None, None) => return Err(WorkspaceError::configuration(CREDENTIALS_REQUIRED)),
        (Some(_), Some(_)) => return Err(WorkspaceError::configuration(CREDENTIALS_EXCLUSIVE)),
    };

    let log_channels = match string_array(config, "log_channels")? {
        Some(channels) if !channels.is_empty() => channels,
        _ => vec![DEFAULT_LOG_CHANNEL.to_string()],
    };

    Ok(ConnectionDescriptor {
        key,
        api_scopes,
        customer_id,
        domain,
        subject_email,
        credential_source,
        log_channels,
    })
}

/// `api_scopes` -> `api scopes`
fn label(field: &str) -> String {
    field.replace('_', " ")
}

fn required(field: &str) -> WorkspaceError {
    WorkspaceError::configuration(format!("The {} field is required.", label(field)))
}

/// Absent, null and empty strings all read as `None`.
fn optional_string(config: &ConfigMap, field: &str) -> WorkspaceResult<Option<String>> {
    match config.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(WorkspaceError::configuration(format!(
            "The {} must be a string.",
            label(field)
        ))),
    }
}

fn string_array(config: &ConfigMap, field: &str) -> WorkspaceResult<Option<Vec<String>>> {
    let items = match config.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(WorkspaceError::configuration(format!(
                "The {} must be an array.",
                label(field)
            )))
        }
    };

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                WorkspaceError::configuration(format!(
                    "The {} must only contain strings.",
                    label(field)
                ))
            })
        })
        .collect::<WorkspaceResult<Vec<_>>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::logger::tests::RecordingLogger;
    use serde_json::json;

    fn inline(value: Value) -> ConfigMap {
        value.as_object().cloned().unwrap()
    }

    fn complete() -> Value {
        json!({
            "api_scopes": ["https://www.googleapis.com/auth/admin.directory.group"],
            "customer_id": "C01234567",
            "domain": "example.com",
            "subject_email": "admin@example.com",
            "json_key_file_path": "/secure/key.json"
        })
    }

    fn message(result: WorkspaceResult<ConnectionDescriptor>) -> String {
        match result {
            Err(WorkspaceError::Configuration(msg)) => msg,
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_config_resolves_unnamed() {
        let resolver = ConnectionResolver::default();
        let descriptor = resolver.resolve(Some("ignored"), Some(&inline(complete()))).unwrap();

        assert_eq!(descriptor.key, None);
        assert_eq!(descriptor.customer_id, "C01234567");
        assert_eq!(descriptor.domain, "example.com");
        assert_eq!(descriptor.subject_email.as_deref(), Some("admin@example.com"));
        assert_eq!(
            descriptor.credential_source,
            CredentialSource::KeyFile(PathBuf::from("/secure/key.json"))
        );
        assert_eq!(descriptor.log_channels, vec!["single".to_string()]);
    }

    #[test]
    fn test_missing_required_fields_are_named() {
        for (field, expected) in [
            ("api_scopes", "The api scopes field is required."),
            ("customer_id", "The customer id field is required."),
            ("domain", "The domain field is required."),
        ] {
            let mut config = inline(complete());
            config.remove(field);
            assert_eq!(message(validate_connection(None, &config)), expected);
        }
    }

    #[test]
    fn test_empty_scopes_count_as_missing() {
        let mut config = inline(complete());
        config.insert("api_scopes".into(), json!([]));
        assert_eq!(
            message(validate_connection(None, &config)),
            "The api scopes field is required."
        );
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let cases = [
            ("api_scopes", json!("scope"), "The api scopes must be an array."),
            ("api_scopes", json!(["ok", 3]), "The api scopes must only contain strings."),
            ("customer_id", json!(["C1"]), "The customer id must be a string."),
            ("domain", json!({"name": "example.com"}), "The domain must be a string."),
            ("subject_email", json!(42), "The subject email must be a string."),
            ("log_channels", json!("single"), "The log channels must be an array."),
        ];

        for (field, value, expected) in cases {
            let mut config = inline(complete());
            config.insert(field.into(), value);
            assert_eq!(message(validate_connection(None, &config)), expected);
        }
    }

    #[test]
    fn test_credentials_required() {
        let mut config = inline(complete());
        config.remove("json_key_file_path");
        assert_eq!(
            message(validate_connection(None, &config)),
            "Either the json_key_file_path or json_key parameters are required."
        );
    }

    #[test]
    fn test_credentials_exclusive() {
        let mut config = inline(complete());
        config.insert("json_key".into(), json!("{\"type\":\"service_account\"}"));
        assert_eq!(
            message(validate_connection(None, &config)),
            "Only one of the json_key_file_path or json_key parameters may be set."
        );
    }

    #[test]
    fn test_inline_json_key() {
        let mut config = inline(complete());
        config.remove("json_key_file_path");
        config.insert("json_key".into(), json!("example testing key"));
        config.insert("log_channels".into(), json!(["single", "workspace"]));

        let descriptor = validate_connection(None, &config).unwrap();
        assert_eq!(
            descriptor.credential_source,
            CredentialSource::InlineKey("example testing key".into())
        );
        assert_eq!(descriptor.log_channels, vec!["single", "workspace"]);
        assert!(!format!("{:?}", descriptor).contains("example testing key"));
    }

    #[test]
    fn test_named_connection_and_default() {
        let source = JsonConfigSource::new(json!({
            "default": { "connection": "test" },
            "connections": { "test": complete() }
        }));
        let resolver = ConnectionResolver::new(Arc::new(source));

        let named = resolver.resolve(Some("test"), None).unwrap();
        assert_eq!(named.key.as_deref(), Some("test"));

        let defaulted = resolver.resolve(None, Some(&ConfigMap::new())).unwrap();
        assert_eq!(defaulted.key.as_deref(), Some("test"));
        assert_eq!(defaulted, named);
    }

    #[test]
    fn test_named_connection_validates_fields() {
        let mut config = complete();
        config["domain"] = json!(null);
        let source = JsonConfigSource::new(json!({ "connections": { "test": config } }));
        let resolver = ConnectionResolver::new(Arc::new(source));

        assert_eq!(
            message(resolver.resolve(Some("test"), None)),
            "The domain field is required."
        );
    }

    #[test]
    fn test_unknown_connection_logs_missing_configuration() {
        let logger = Arc::new(RecordingLogger::default());
        let resolver = ConnectionResolver::default().with_logger(logger.clone());

        let msg = message(resolver.resolve(Some("nope"), None));
        assert!(msg.contains("`nope`"));

        let events = logger.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "google-api-config-missing-error");
        assert_eq!(events[0].connection_key.as_deref(), Some("nope"));
        assert_eq!(events[0].status_code, Some(501));
    }

    #[test]
    fn test_no_default_connection() {
        let resolver = ConnectionResolver::default();
        assert_eq!(
            message(resolver.resolve(None, None)),
            "No default connection has been configured."
        );
    }
}
