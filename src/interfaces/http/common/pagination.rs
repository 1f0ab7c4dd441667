//! Pagination query parameters and response headers
//!
//! List endpoints return a bare JSON array; the page position travels in
//! `Pagination-Page`, `Pagination-PageSize`, `Pagination-Total` and a
//! `Link` header with `first`, `prev`, `next` and `last` relations.

use std::sync::Arc;

use axum::http::header::LINK;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use crate::shared::{PageRequest, PaginatedResult, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub const PAGINATION_PAGE: HeaderName = HeaderName::from_static("pagination-page");
pub const PAGINATION_PAGE_SIZE: HeaderName = HeaderName::from_static("pagination-pagesize");
pub const PAGINATION_TOTAL: HeaderName = HeaderName::from_static("pagination-total");

/// `?page=&pageSize=`. Kept as raw strings: invalid values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, starting at 1
    #[param(value_type = Option<u64>, minimum = 1)]
    pub page: Option<String>,
    /// Number of records per page (1 to 100)
    #[param(value_type = Option<u64>, minimum = 1, maximum = 100)]
    pub page_size: Option<String>,
}

/// Page size limits and the public base URL used to build `Link` headers.
#[derive(Debug, Clone)]
pub struct Paging {
    base_url: Arc<str>,
    default_page_size: u64,
    max_page_size: u64,
}

impl Default for Paging {
    fn default() -> Self {
        Self::new("http://localhost:3000", DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

impl Paging {
    pub fn new(base_url: &str, default_page_size: u64, max_page_size: u64) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            default_page_size,
            max_page_size,
        }
    }

    /// Absolute URL of a resource path such as `/issues/<id>`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request(&self, page: Option<&str>, page_size: Option<&str>) -> PageRequest {
        PageRequest::parse(page, page_size, self.default_page_size, self.max_page_size)
    }

    /// Pagination headers for one page of `path`. `filters` are extra query
    /// parameters repeated in every link (e.g. `status=new`).
    pub fn headers<T>(
        &self,
        path: &str,
        filters: &[(&str, &str)],
        result: &PaginatedResult<T>,
    ) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(PAGINATION_PAGE, HeaderValue::from(result.page));
        headers.insert(PAGINATION_PAGE_SIZE, HeaderValue::from(result.limit));
        headers.insert(PAGINATION_TOTAL, HeaderValue::from(result.total));

        match HeaderValue::from_str(&self.link(path, filters, result)) {
            Ok(link) => {
                headers.insert(LINK, link);
            }
            Err(e) => warn!(path, "Dropping unrepresentable Link header: {}", e),
        }
        headers
    }

    fn link<T>(&self, path: &str, filters: &[(&str, &str)], result: &PaginatedResult<T>) -> String {
        let last = result.total_pages.max(1);
        let mut relations = vec![("first", 1)];
        if result.page > 1 {
            relations.push(("prev", (result.page - 1).min(last)));
        }
        if result.page < last {
            relations.push(("next", result.page + 1));
        }
        relations.push(("last", last));

        let filters: String = filters
            .iter()
            .map(|(key, value)| format!("{}={}&", key, value))
            .collect();

        relations
            .into_iter()
            .map(|(rel, page)| {
                format!(
                    "<{}{}?{}page={}&pageSize={}>; rel=\"{}\"",
                    self.base_url, path, filters, page, result.limit, rel
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
