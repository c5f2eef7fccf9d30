//! Cursor Pagination
//!
//! A list response is paginated when its body carries a `nextPageToken`.
//! The walker re-issues the GET with `pageToken` until a page comes back
//! without one, merging every page into a single value.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::client::GoogleClient;
use super::request::{Method, Params};
use super::response::ResponseStatus;
use super::transport::RawResponse;
use crate::common::WorkspaceResult;

pub const NEXT_PAGE_TOKEN: &str = "nextPageToken";
pub const PAGE_TOKEN_PARAM: &str = "pageToken";

/// Per-page fields callers never see in a merged result
const BOOKKEEPING_FIELDS: [&str; 3] = ["kind", "etag", NEXT_PAGE_TOKEN];

/// Continuation token of a page, if it has a usable one
pub fn next_page_token(body: &Value) -> Option<&str> {
    body.get(NEXT_PAGE_TOKEN)
        .and_then(|v| v.as_str())
        .filter(|token| !token.is_empty())
}

pub fn is_paginated(body: &Value) -> bool {
    next_page_token(body).is_some()
}

/// Drop `kind`, `etag` and `nextPageToken` from a page body.
pub fn strip_bookkeeping(page: Value) -> Map<String, Value> {
    match page {
        Value::Object(mut fields) => {
            for field in BOOKKEEPING_FIELDS {
                fields.remove(field);
            }
            fields
        }
        _ => Map::new(),
    }
}

/// Merges page bodies in fetch order.
///
/// Array fields are concatenated under their field name; any other field
/// keeps the value from the last page that carried it.
#[derive(Debug, Default)]
pub struct PageAccumulator {
    fields: Map<String, Value>,
    pages: usize,
}

impl PageAccumulator {
    pub fn merge(&mut self, page: Value) {
        self.pages += 1;

        for (name, value) in strip_bookkeeping(page) {
            match value {
                Value::Array(items) => match self.fields.get_mut(&name) {
                    Some(Value::Array(existing)) => existing.extend(items),
                    _ => {
                        self.fields.insert(name, Value::Array(items));
                    }
                },
                other => {
                    self.fields.insert(name, other);
                }
            }
        }
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Every record across all pages, flattened in field then page order
    #[cfg(test)]
    fn records(&self) -> Vec<&Value> {
        self.fields
            .values()
            .flat_map(|value| match value {
                Value::Array(items) => items.iter().collect::<Vec<_>>(),
                other => vec![other],
            })
            .collect()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Result of walking every page
#[derive(Debug)]
pub enum PageOutcome {
    /// All pages fetched (or the page limit reached); the merged body
    Complete(Value),
    /// A follow-up page was not 2xx; the walk stopped there
    Failed(RawResponse),
}

pub struct PaginationWalker<'a> {
    client: &'a GoogleClient,
    max_pages: Option<usize>,
}

impl<'a> PaginationWalker<'a> {
    pub fn new(client: &'a GoogleClient, max_pages: Option<usize>) -> Self {
        Self { client, max_pages }
    }

    /// Fetch and merge every page after `first`.
    ///
    /// `params` are the parameters of the first request; each follow-up adds
    /// `pageToken`. Pages are fetched strictly one after another.
    pub async fn collect(&self, url: &str, params: &Params, first: Value) -> WorkspaceResult<PageOutcome> {
        let mut accumulator = PageAccumulator::default();
        let mut token = next_page_token(&first).map(str::to_string);
        accumulator.merge(first);

        while let Some(page_token) = token.take() {
            if let Some(max) = self.max_pages {
                if accumulator.pages() >= max {
                    warn!(url, pages = max, "Page limit reached, returning partial results");
                    break;
                }
            }

            let mut page_params = params.clone();
            page_params.insert(PAGE_TOKEN_PARAM.to_string(), Value::String(page_token));

            let raw = self.client.dispatch(Method::Get, url, &page_params).await?;
            if !ResponseStatus::from_code(raw.status).successful {
                warn!(
                    url,
                    status = raw.status,
                    pages = accumulator.pages(),
                    "Follow-up page request failed, stopping pagination"
                );
                return Ok(PageOutcome::Failed(raw));
            }

            let body = raw.parsed_body().unwrap_or(Value::Null);
            token = next_page_token(&body).map(str::to_string);
            accumulator.merge(body);
            debug!(url, pages = accumulator.pages(), "Fetched page");
        }

        Ok(PageOutcome::Complete(accumulator.into_value()))
    }
}
