//! Generic facade over fully-qualified URLs
//!
//! For any Google endpoint without a dedicated facade. No connection
//! parameters are merged.

use super::client::GoogleClient;
use super::request::RequiredParameters;

pub struct Rest {
    client: GoogleClient,
    base_url: String,
}

super::google_api_wrapper!(Rest, "", RequiredParameters::None);
