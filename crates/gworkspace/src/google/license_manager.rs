//! Enterprise License Manager API v1
//!
//! Paths are relative to `/product`, e.g. `/Google-Apps/users`. Every request
//! carries the connection's `customerId`.

use super::client::GoogleClient;
use super::request::RequiredParameters;

const LICENSE_MANAGER_API_BASE: &str = "https://licensing.googleapis.com/apps/licensing/v1/product";

pub struct LicenseManager {
    client: GoogleClient,
    base_url: String,
}

super::google_api_wrapper!(
    LicenseManager,
    LICENSE_MANAGER_API_BASE,
    RequiredParameters::CustomerId
);
