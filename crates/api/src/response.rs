//! Shared response envelope types for API handlers.
//!
//! Single resources use the `{ "data": ... }` envelope; listings use the
//! paginated `{ "data", "links", "meta" }` envelope.

use serde::Serialize;
use slotbook_core::booking::PAGE_SIZE;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Successful-update payload: the booking plus the `cleared` flag that
/// tells the client UI to reset its edit state.
#[derive(Debug, Serialize)]
pub struct UpdatedResponse<T: Serialize> {
    pub data: T,
    pub cleared: bool,
}

/// Pagination links.
#[derive(Debug, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// Paginated `{ data, links, meta }` envelope.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub links: PageLinks,
    pub meta: PageMeta,
}

impl<T: Serialize> Page<T> {
    /// Assemble a page from one fetched slice and the total row count.
    ///
    /// `path` may already carry query parameters (e.g. the `week` filter);
    /// the page parameter is appended with the right separator.
    pub fn new(path: &str, data: Vec<T>, current_page: i64, total: i64) -> Self {
        let last_page = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
        let sep = if path.contains('?') { '&' } else { '?' };
        let link = |page: i64| format!("{path}{sep}page={page}");

        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let first_row = (current_page - 1) * PAGE_SIZE + 1;
            (Some(first_row), Some(first_row + data.len() as i64 - 1))
        };

        Page {
            links: PageLinks {
                first: link(1),
                last: link(last_page),
                prev: (current_page > 1).then(|| link(current_page - 1)),
                next: (current_page < last_page).then(|| link(current_page + 1)),
            },
            meta: PageMeta {
                current_page,
                last_page,
                per_page: PAGE_SIZE,
                total,
                from,
                to,
            },
            data,
        }
    }
}
