//! Response Logging
//!
//! Structured events classified by response status. Emission never fails and
//! never aborts the request that produced it.

use tracing::{debug, error, info, warn};

use super::request::Method;
use super::response::ResponseEnvelope;
use crate::config::{ConnectionDescriptor, DEFAULT_LOG_CHANNEL};

/// Target used for every API event
pub const LOG_TARGET: &str = "gworkspace::api";

pub const EVENT_INFO: &str = "google-api-response-info";
pub const EVENT_CLIENT_ERROR: &str = "google-api-response-client-error";
pub const EVENT_SERVER_ERROR: &str = "google-api-response-server-error";
pub const EVENT_CONFIG_MISSING: &str = "google-api-config-missing-error";

/// Status code carried by missing-configuration events
pub const MISSING_CONFIGURATION_STATUS: u16 = 501;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Debug,
    Info,
    /// Client errors; emitted at WARN
    Notice,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: EventLevel,
    pub event_type: &'static str,
    pub method: Option<Method>,
    pub url: Option<String>,
    pub status_code: Option<u16>,
    pub message: String,
    pub connection_key: Option<String>,
    pub log_channels: Vec<String>,
}

impl LogEvent {
    /// Event for a completed API call
    pub fn response(
        connection: &ConnectionDescriptor,
        method: Method,
        url: &str,
        envelope: &ResponseEnvelope,
    ) -> Self {
        let status = &envelope.status;
        let (level, event_type) = if status.successful {
            (EventLevel::Info, EVENT_INFO)
        } else if status.client_error {
            (EventLevel::Notice, EVENT_CLIENT_ERROR)
        } else if status.server_error {
            (EventLevel::Error, EVENT_SERVER_ERROR)
        } else {
            (EventLevel::Debug, EVENT_INFO)
        };

        Self {
            level,
            event_type,
            method: Some(method),
            url: Some(url.to_string()),
            status_code: Some(status.code),
            message: format!("{} {} {}", method, status.code, url),
            connection_key: connection.key.clone(),
            log_channels: connection.log_channels.clone(),
        }
    }

    /// Event for a connection that could not be found
    pub fn missing_configuration(connection_key: Option<&str>, message: &str) -> Self {
        Self {
            level: EventLevel::Error,
            event_type: EVENT_CONFIG_MISSING,
            method: None,
            url: None,
            status_code: Some(MISSING_CONFIGURATION_STATUS),
            message: message.to_string(),
            connection_key: connection_key.map(str::to_string),
            log_channels: vec![DEFAULT_LOG_CHANNEL.to_string()],
        }
    }
}

/// Logging capability injected into the resolver and every facade
pub trait ResponseLogger: Send + Sync {
    fn record(&self, event: LogEvent);

    fn log_response(
        &self,
        connection: &ConnectionDescriptor,
        method: Method,
        url: &str,
        envelope: &ResponseEnvelope,
    ) {
        self.record(LogEvent::response(connection, method, url, envelope));
    }

    fn log_missing_configuration(&self, connection_key: Option<&str>, message: &str) {
        self.record(LogEvent::missing_configuration(connection_key, message));
    }
}

/// Emits events through `tracing` under `gworkspace::api`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ResponseLogger for TracingLogger {
    fn record(&self, event: LogEvent) {
        let method = event.method.map(|m| m.as_str()).unwrap_or("");
        let url = event.url.as_deref().unwrap_or("");
        let connection_key = event.connection_key.as_deref().unwrap_or("");
        let status_code = event.status_code.unwrap_or_default();
        let channels = event.log_channels.join(",");

        macro_rules! emit {
            ($level:ident) => {
                $level!(
                    target: LOG_TARGET,
                    event_type = event.event_type,
                    method,
                    url,
                    status_code,
                    connection_key,
                    log_channels = %channels,
                    "{}",
                    event.message
                )
            };
        }

        match event.level {
            EventLevel::Debug => emit!(debug),
            EventLevel::Info => emit!(info),
            EventLevel::Notice => emit!(warn),
            EventLevel::Error => emit!(error),
        }
    }
}
