//! Turns command-line arguments into one facade call.

use anyhow::{bail, Context};
use clap::ValueEnum;
use gworkspace::{ApiClient, Params, ResponseEnvelope};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Service {
    Directory,
    Calendar,
    Gmail,
    Drive,
    Sheets,
    Vault,
    LicenseManager,
    /// Fully-qualified URLs, no connection parameters
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Build the parameter map from `--data` and repeated `--param k=v`.
///
/// `--param` values are read as JSON when they parse (`maxResults=10` is a
/// number), otherwise as strings. A key given more than once becomes an
/// array. `--param` entries override `--data` fields of the same name.
pub fn build_params(data: Option<&str>, pairs: &[String]) -> anyhow::Result<Params> {
    let mut params = match data {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("--data is not valid JSON")? {
            Value::Object(map) => map,
            _ => bail!("--data must be a JSON object"),
        },
        None => Params::new(),
    };

    let mut repeated: Params = Params::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("--param `{}` is not in key=value form", pair);
        };
        if key.is_empty() {
            bail!("--param `{}` has an empty key", pair);
        }
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

        match repeated.get_mut(key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                repeated.insert(key.to_string(), value);
            }
        }
    }

    params.extend(repeated);
    Ok(params)
}

macro_rules! dispatch {
    ($facade:expr, $verb:expr, $path:expr, $params:expr) => {{
        let facade = $facade;
        match $verb {
            Verb::Get => facade.get($path, $params).await,
            Verb::Post => facade.post($path, $params).await,
            Verb::Put => facade.put($path, $params).await,
            Verb::Patch => facade.patch($path, $params).await,
            Verb::Delete => facade.delete($path, $params).await,
        }
    }};
}

pub async fn run(
    client: &ApiClient,
    service: Service,
    verb: Verb,
    path: &str,
    params: Params,
) -> gworkspace::WorkspaceResult<ResponseEnvelope> {
    match service {
        Service::Directory => dispatch!(client.directory().await?, verb, path, params),
        Service::Calendar => dispatch!(client.calendar().await?, verb, path, params),
        Service::Gmail => dispatch!(client.gmail().await?, verb, path, params),
        Service::Drive => dispatch!(client.drive().await?, verb, path, params),
        Service::Sheets => dispatch!(client.sheets().await?, verb, path, params),
        Service::Vault => dispatch!(client.vault().await?, verb, path, params),
        Service::LicenseManager => dispatch!(client.license_manager().await?, verb, path, params),
        Service::Rest => dispatch!(client.rest().await?, verb, path, params),
    }
}
