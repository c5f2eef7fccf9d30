//! Admin SDK Directory API v1
//!
//! Users, groups, members, org units. Every request carries the connection's
//! `domain` and `customer`; GETs may exclude either.

use super::client::GoogleClient;
use super::request::RequiredParameters;

const DIRECTORY_API_BASE: &str = "https://admin.googleapis.com/admin/directory/v1";

pub struct Directory {
    client: GoogleClient,
    base_url: String,
}

super::google_api_wrapper!(
    Directory,
    DIRECTORY_API_BASE,
    RequiredParameters::DOMAIN_AND_CUSTOMER,
    exclusions
);
