use serde::{Deserialize, Serialize};

/// One page of a server-side paginated collection
///
/// `results` is required on decode so that single-entity payloads never
/// mistake themselves for an empty page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: usize, results: Vec<T>) -> Self {
        Self { count, results }
    }
}

/// Offset window requested from a paginated collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

impl PageWindow {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Splits `[0, count)` into consecutive windows of `page_size`.
    ///
    /// Every window has `limit == page_size`; the server truncates the last one.
    pub fn partition(count: usize, page_size: usize) -> Vec<Self> {
        if page_size == 0 {
            return Vec::new();
        }
        (0..count)
            .step_by(page_size)
            .map(|offset| Self::new(offset, page_size))
            .collect()
    }
}

impl std::fmt::Display for PageWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "offset={} limit={}", self.offset, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_exact_multiple() {
        let windows = PageWindow::partition(3600, 1200);
        assert_eq!(
            windows,
            vec![
                PageWindow::new(0, 1200),
                PageWindow::new(1200, 1200),
                PageWindow::new(2400, 1200),
            ]
        );
    }

    #[test]
    fn test_partition_with_remainder() {
        let windows = PageWindow::partition(2500, 1200);
        let offsets: Vec<usize> = windows.iter().map(|w| w.offset).collect();
        assert_eq!(offsets, vec![0, 1200, 2400]);
    }

    #[test]
    fn test_partition_empty_collection() {
        assert!(PageWindow::partition(0, 1200).is_empty());
    }

    #[test]
    fn test_partition_zero_page_size() {
        assert!(PageWindow::partition(10, 0).is_empty());
    }

    #[test]
    fn test_page_requires_results() {
        let single: Result<Page<serde_json::Value>, _> =
            serde_json::from_str(r#"{"name": "curl", "purl": "pkg:rpm/curl"}"#);
        assert!(single.is_err());

        let page: Page<serde_json::Value> =
            serde_json::from_str(r#"{"results": [{"name": "curl"}]}"#).unwrap();
        assert_eq!(page.count, 0);
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_window_display() {
        assert_eq!(PageWindow::new(1200, 1200).to_string(), "offset=1200 limit=1200");
    }
}
