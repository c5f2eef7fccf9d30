//! Google Vault API v1

use super::client::GoogleClient;
use super::request::RequiredParameters;

const VAULT_API_BASE: &str = "https://vault.googleapis.com/v1";

pub struct Vault {
    client: GoogleClient,
    base_url: String,
}

super::google_api_wrapper!(Vault, VAULT_API_BASE, RequiredParameters::None);
