//! Google Calendar API v3
//!
//! Same parameter contract as the Directory facade: `domain` and `customer`
//! are merged, and GETs may exclude either.

use super::client::GoogleClient;
use super::request::RequiredParameters;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct Calendar {
    client: GoogleClient,
    base_url: String,
}

super::google_api_wrapper!(
    Calendar,
    CALENDAR_API_BASE,
    RequiredParameters::DOMAIN_AND_CUSTOMER,
    exclusions
);
