//! Google API Client Module
//!
//! One authenticated dispatcher (`GoogleClient`) shared by thin per-product
//! facades. Facades differ only in base URL and in the connection parameters
//! merged into each request.

pub mod calendar;
pub mod client;
pub mod directory;
pub mod drive;
pub mod gmail;
pub mod license_manager;
pub mod logger;
pub mod pagination;
pub mod request;
pub mod response;
pub mod rest;
pub mod sheets;
pub mod transport;
pub mod vault;

pub use calendar::Calendar;
pub use client::{ClientOptions, ConnectionContext, GoogleClient, DEFAULT_MAX_PAGES};
pub use directory::Directory;
pub use drive::Drive;
pub use gmail::Gmail;
pub use license_manager::LicenseManager;
pub use logger::{LogEvent, ResponseLogger, TracingLogger};
pub use request::{params, Exclusions, HttpRequest, Method, Params, RequiredParameters};
pub use response::{ResponseEnvelope, ResponseStatus};
pub use rest::Rest;
pub use sheets::Sheets;
pub use transport::{RawResponse, ReqwestTransport, Transport};
pub use vault::Vault;

/// Implements the standard facade surface on a struct holding
/// `client: GoogleClient` and `base_url: String`.
///
/// The optional `exclusions` form replaces the plain `get` with one that
/// honours domain/customer exclusion flags.
macro_rules! google_api_wrapper {
    ($name:ident, $base:expr, $required:expr) => {
        $crate::google::google_api_wrapper!(@common $name, $base, $required);

        impl $name {
            /// GET `path`, following pagination
            pub async fn get(
                &self,
                path: &str,
                params: $crate::google::Params,
            ) -> $crate::common::WorkspaceResult<$crate::google::ResponseEnvelope> {
                self.client
                    .execute($crate::google::Method::Get, &self.url(path), params, $required)
                    .await
            }
        }
    };
    ($name:ident, $base:expr, $required:expr, exclusions) => {
        $crate::google::google_api_wrapper!(@common $name, $base, $required);

        impl $name {
            /// GET `path` with both `domain` and `customer` merged, following pagination
            pub async fn get(
                &self,
                path: &str,
                params: $crate::google::Params,
            ) -> $crate::common::WorkspaceResult<$crate::google::ResponseEnvelope> {
                self.get_excluding(path, params, $crate::google::Exclusions::default())
                    .await
            }

            /// GET `path`, leaving out the excluded connection parameters
            pub async fn get_excluding(
                &self,
                path: &str,
                params: $crate::google::Params,
                exclusions: $crate::google::Exclusions,
            ) -> $crate::common::WorkspaceResult<$crate::google::ResponseEnvelope> {
                self.client
                    .execute(
                        $crate::google::Method::Get,
                        &self.url(path),
                        params,
                        exclusions.into(),
                    )
                    .await
            }
        }
    };
    (@common $name:ident, $base:expr, $required:expr) => {
        impl $name {
            pub const BASE_URL: &'static str = $base;

            /// Create the facade on an authenticated client
            pub fn new(client: $crate::google::GoogleClient) -> Self {
                Self {
                    client,
                    base_url: $base.to_string(),
                }
            }

            /// Point the facade at another host, e.g. a mock server
            pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
                self.base_url = base_url.into();
                self
            }

            pub fn base_url(&self) -> &str {
                &self.base_url
            }

            pub fn client(&self) -> &$crate::google::GoogleClient {
                &self.client
            }

            fn url(&self, path: &str) -> String {
                format!("{}{}", self.base_url, path)
            }

            pub async fn post(
                &self,
                path: &str,
                params: $crate::google::Params,
            ) -> $crate::common::WorkspaceResult<$crate::google::ResponseEnvelope> {
                self.client
                    .execute($crate::google::Method::Post, &self.url(path), params, $required)
                    .await
            }

            pub async fn put(
                &self,
                path: &str,
                params: $crate::google::Params,
            ) -> $crate::common::WorkspaceResult<$crate::google::ResponseEnvelope> {
                self.client
                    .execute($crate::google::Method::Put, &self.url(path), params, $required)
                    .await
            }

            pub async fn patch(
                &self,
                path: &str,
                params: $crate::google::Params,
            ) -> $crate::common::WorkspaceResult<$crate::google::ResponseEnvelope> {
                self.client
                    .execute($crate::google::Method::Patch, &self.url(path), params, $required)
                    .await
            }

            pub async fn delete(
                &self,
                path: &str,
                params: $crate::google::Params,
            ) -> $crate::common::WorkspaceResult<$crate::google::ResponseEnvelope> {
                self.client
                    .execute($crate::google::Method::Delete, &self.url(path), params, $required)
                    .await
            }
        }
    };
}

pub(crate) use google_api_wrapper;
