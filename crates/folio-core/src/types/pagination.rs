//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// A normalized page of items.
///
/// The backend names the list field per resource (`projects`, `messages`),
/// so the services decode into their own wire structs and convert here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Current page number (1-based).
    pub page: u32,
    /// Number of items per page.
    pub limit: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> Paged<T> {
    /// Create a page, deriving `total_pages` from `total` and `limit`.
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Wrap an unpaged list as a single page holding everything.
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        let limit = (items.len() as u32).max(1);
        Self::new(items, total, 1, limit)
    }

    /// Whether there is a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
