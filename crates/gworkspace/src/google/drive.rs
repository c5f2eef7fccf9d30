//! Google Drive API v3

use super::client::GoogleClient;
use super::request::RequiredParameters;

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

pub struct Drive {
    client: GoogleClient,
    base_url: String,
}

super::google_api_wrapper!(Drive, DRIVE_API_BASE, RequiredParameters::None);
