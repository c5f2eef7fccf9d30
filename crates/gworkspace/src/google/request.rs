//! Request Types
//!
//! Verbs, parameter maps and the connection-derived parameters each API
//! requires.

use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

use crate::config::ConnectionDescriptor;

/// Request parameters: query string for GET/DELETE, JSON body otherwise
pub type Params = Map<String, Value>;

/// Build `Params` from a JSON object; anything else yields an empty map.
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// GET and DELETE carry their parameters in the query string
    pub fn uses_query(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Connection-derived parameters merged into every request of an API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredParameters {
    /// Gmail, Drive, Sheets, Vault, Rest
    None,
    /// Directory and Calendar: `domain` and `customer`
    DomainAndCustomer {
        exclude_domain: bool,
        exclude_customer: bool,
    },
    /// License Manager: `customerId`
    CustomerId,
}

impl RequiredParameters {
    pub const DOMAIN_AND_CUSTOMER: Self = Self::DomainAndCustomer {
        exclude_domain: false,
        exclude_customer: false,
    };

    /// Merge into `params`. Required values always overwrite caller values.
    ///
    /// With both exclusions set, `exclude_customer` wins and `domain` is sent.
    pub fn apply(&self, connection: &ConnectionDescriptor, params: &mut Params) {
        let domain = || Value::String(connection.domain.clone());
        let customer = || Value::String(connection.customer_id.clone());

        match *self {
            Self::None => {}
            Self::DomainAndCustomer {
                exclude_customer: true,
                ..
            } => {
                params.insert("domain".into(), domain());
            }
            Self::DomainAndCustomer {
                exclude_domain: true,
                ..
            } => {
                params.insert("customer".into(), customer());
            }
            Self::DomainAndCustomer { .. } => {
                params.insert("domain".into(), domain());
                params.insert("customer".into(), customer());
            }
            Self::CustomerId => {
                params.insert("customerId".into(), customer());
            }
        }
    }
}

/// Which connection parameters to leave out of a Directory/Calendar GET
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exclusions {
    pub domain: bool,
    pub customer: bool,
}

impl Exclusions {
    pub fn domain() -> Self {
        Self {
            domain: true,
            customer: false,
        }
    }

    pub fn customer() -> Self {
        Self {
            domain: false,
            customer: true,
        }
    }
}

impl From<Exclusions> for RequiredParameters {
    fn from(exclusions: Exclusions) -> Self {
        Self::DomainAndCustomer {
            exclude_domain: exclusions.domain,
            exclude_customer: exclusions.customer,
        }
    }
}

/// One fully-prepared HTTP call handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Flatten parameters into query pairs.
///
/// Strings go verbatim, arrays repeat the key, nulls are dropped and any
/// other value is sent as its JSON text.
pub fn to_query(params: &Params) -> Vec<(String, String)> {
    let mut query = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(v) = query_value(item) {
                        query.push((key.clone(), v));
                    }
                }
            }
            other => {
                if let Some(v) = query_value(other) {
                    query.push((key.clone(), v));
                }
            }
        }
    }
    query
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialSource;
    use serde_json::json;

    fn connection() -> ConnectionDescriptor {
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

    #[test]
    fn test_domain_and_customer_override_caller_values() {
        let mut p = params(json!({"domain": "other", "customer": "other", "maxResults": 5}));
        RequiredParameters::DOMAIN_AND_CUSTOMER.apply(&connection(), &mut p);

        assert_eq!(p["domain"], "dom1");
        assert_eq!(p["customer"], "cust1");
        assert_eq!(p["maxResults"], 5);
    }

    #[test]
    fn test_exclusions() {
        let mut p = Params::new();
        RequiredParameters::from(Exclusions::domain()).apply(&connection(), &mut p);
        assert!(!p.contains_key("domain"));
        assert_eq!(p["customer"], "cust1");

        let mut p = Params::new();
        RequiredParameters::from(Exclusions::customer()).apply(&connection(), &mut p);
        assert_eq!(p["domain"], "dom1");
        assert!(!p.contains_key("customer"));

        let mut p = Params::new();
        RequiredParameters::from(Exclusions {
            domain: true,
            customer: true,
        })
        .apply(&connection(), &mut p);
        assert_eq!(p["domain"], "dom1");
        assert!(!p.contains_key("customer"));
    }

    #[test]
    fn test_customer_id_and_none() {
        let mut p = Params::new();
        RequiredParameters::CustomerId.apply(&connection(), &mut p);
        assert_eq!(p.len(), 1);
        assert_eq!(p["customerId"], "cust1");

        let mut p = Params::new();
        RequiredParameters::None.apply(&connection(), &mut p);
        assert!(p.is_empty());
    }

    #[test]
    fn test_to_query_encoding() {
        let query = to_query(&params(json!({
            "q": "is:unread",
            "maxResults": 10,
            "showDeleted": false,
            "labelIds": ["INBOX", "UNREAD"],
            "pageToken": null
        })));

        assert!(query.contains(&("q".into(), "is:unread".into())));
        assert!(query.contains(&("maxResults".into(), "10".into())));
        assert!(query.contains(&("showDeleted".into(), "false".into())));
        assert!(query.contains(&("labelIds".into(), "INBOX".into())));
        assert!(query.contains(&("labelIds".into(), "UNREAD".into())));
        assert!(!query.iter().any(|(k, _)| k == "pageToken"));
    }

    #[test]
    fn test_params_from_non_object() {
        assert!(params(json!(null)).is_empty());
        assert!(params(json!([1, 2])).is_empty());
    }
}
