//! Query helpers
//!
//! Comma-separated value splitting, list sanitization, and page/limit
//! resolution used by the list endpoints.

use crate::core::Config;

/// Split a comma-separated query value, trimming entries and dropping empties.
/// Insertion order is preserved.
pub fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Trim an optional query value, mapping blank to `None`.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim every entry and drop the empty ones, preserving order.
pub fn sanitize_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Resolved page window: 1-based page, effective page size, and record offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub page_size: u32,
    pub start: u64,
}

impl PageWindow {
    /// Resolve page/limit query values against the configured defaults.
    ///
    /// `page` defaults to 1; `limit` defaults to `default_page_size` and is
    /// capped at `max_page_size` (the schema layer already rejects limits
    /// above the cap, this is the belt for direct callers).
    pub fn resolve(page: Option<u32>, limit: Option<u32>, config: &Config) -> Self {
        let page = page.unwrap_or(1).max(1);
        let page_size = limit
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size);
        Self {
            page,
            page_size,
            start: (page as u64 - 1) * page_size as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_drops_empties() {
        let tags = split_csv(Some(" spicy , vegan ,, ,north-indian"));
        assert_eq!(tags, vec!["spicy", "vegan", "north-indian"]);
        assert!(split_csv(None).is_empty());
        assert!(split_csv(Some("  ,  ")).is_empty());
    }

    #[test]
    fn sanitize_list_preserves_order() {
        let out = sanitize_list(vec![
            "  chinese ".to_string(),
            String::new(),
            "thai".to_string(),
        ]);
        assert_eq!(out, vec!["chinese", "thai"]);
    }

    #[test]
    fn page_window_defaults_and_caps() {
        let config = Config::for_tests();
        let window = PageWindow::resolve(None, None, &config);
        assert_eq!(window.page, 1);
        assert_eq!(window.page_size, config.default_page_size);
        assert_eq!(window.start, 0);

        let window = PageWindow::resolve(Some(3), Some(10_000), &config);
        assert_eq!(window.page_size, config.max_page_size);
        assert_eq!(window.start, 2 * config.max_page_size as u64);
    }
}
