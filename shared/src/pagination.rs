//! Pagination envelope for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination metadata returned alongside every list page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page (1-based)
    pub page: u32,
    /// Records per page
    pub page_size: u32,
    /// Total records matching the filter
    pub total: u64,
    /// Total pages, never below 1
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let total_pages = if page_size > 0 {
            ((total as f64) / (page_size as f64)).ceil() as u32
        } else {
            1
        };
        Self {
            page,
            page_size,
            total,
            total_pages: total_pages.max(1),
        }
    }
}

/// List response: `{ data, meta }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: u32, page_size: u32, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(page, page_size, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let meta = PaginationMeta::new(2, 10, 101);
        assert_eq!(meta.total_pages, 11);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let meta = PaginationMeta::new(1, 20, 0);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.total, 0);
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        let meta = PaginationMeta::new(1, 20, 100);
        assert_eq!(meta.total_pages, 5);
    }
}
