//! Google Sheets API v4

use super::client::GoogleClient;
use super::request::RequiredParameters;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct Sheets {
    client: GoogleClient,
    base_url: String,
}

super::google_api_wrapper!(Sheets, SHEETS_API_BASE, RequiredParameters::None);
