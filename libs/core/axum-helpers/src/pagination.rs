//! Page-number pagination envelope for collection endpoints.
//!
//! Collections are served in fixed-size pages addressed by a 1-based `page`
//! query parameter. The response envelope carries the total count and
//! relative links to the adjacent pages.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Fixed page size for all collection endpoints.
pub const PAGE_SIZE: u64 = 5;

fn default_page() -> u64 {
    1
}

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1 }
    }
}

/// Paginated response envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    /// Total number of records across all pages
    pub count: u64,
    /// Link to the next page, if any
    pub next: Option<String>,
    /// Link to the previous page, if any
    pub previous: Option<String>,
    /// Records on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page envelope with next/previous links relative to `path`.
    pub fn new(path: &str, page: u64, page_size: u64, count: u64, results: Vec<T>) -> Self {
        let next = if page.saturating_mul(page_size) < count {
            Some(format!("{}?page={}", path, page + 1))
        } else {
            None
        };
        let previous = if page > 1 {
            Some(format!("{}?page={}", path, page - 1))
        } else {
            None
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Resolve a 1-based page number against a collection size.
///
/// Returns the row offset for the page, or `None` when the page is out of
/// range. Page 1 is always in range, even for an empty collection.
pub fn resolve_offset(page: u64, page_size: u64, count: u64) -> Option<u64> {
    if page == 0 {
        return None;
    }

    let offset = (page - 1).saturating_mul(page_size);
    if page > 1 && offset >= count {
        return None;
    }

    Some(offset)
}
