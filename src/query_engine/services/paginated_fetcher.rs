use super::fan_out::fan_out;
use crate::query_engine::domain::PageWindow;
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;
use std::cmp::Ordering;

/// A server-side paginated collection with fixed filter conditions
///
/// Implementations must be `Sync` because pages are requested concurrently
/// through a shared reference.
#[async_trait]
pub trait PagedCollection: Sync {
    type Item: Send;

    /// Short description used in logs and errors (e.g. "components name=curl")
    fn describe(&self) -> String;

    /// Total number of entries matching the conditions
    async fn count(&self) -> Result<usize>;

    /// Entries within one offset window
    async fn page(&self, window: PageWindow) -> Result<Vec<Self::Item>>;
}

/// Retrieves complete result sets from paginated collections
///
/// One count request decides whether the download is allowed at all; the
/// offset windows are then requested concurrently and the merged result is
/// sorted so that output order does not depend on completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatedFetcher {
    page_size: usize,
    max_result_count: usize,
    max_concurrent_requests: usize,
}

impl PaginatedFetcher {
    pub const DEFAULT_PAGE_SIZE: usize = 1200;
    pub const DEFAULT_MAX_RESULT_COUNT: usize = 50_000;
    pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 16;

    /// Creates a fetcher
    ///
    /// # Arguments
    /// * `page_size` - Entries requested per window
    /// * `max_result_count` - Largest total count that will be downloaded
    /// * `max_concurrent_requests` - Windows in flight at the same time
    ///
    /// # Errors
    /// Returns an error if any of the values is zero
    pub fn new(
        page_size: usize,
        max_result_count: usize,
        max_concurrent_requests: usize,
    ) -> Result<Self> {
        if page_size == 0 || max_result_count == 0 || max_concurrent_requests == 0 {
            anyhow::bail!(
                "Invalid fetch settings: page_size, max_result_count and max_concurrent_requests must be greater than zero"
            );
        }
        Ok(Self {
            page_size,
            max_result_count,
            max_concurrent_requests,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn max_result_count(&self) -> usize {
        self.max_result_count
    }

    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    /// Windows that cover a collection of `count` entries
    pub fn plan(&self, count: usize) -> Vec<PageWindow> {
        PageWindow::partition(count, self.page_size)
    }

    /// Downloads every entry of `collection`, sorted with `order`
    ///
    /// # Errors
    /// - [`QueryError::ResultTooLarge`] if the count exceeds the limit; no page is requested
    /// - [`QueryError::FanOutFailure`] if any window fails; no partial result is returned
    pub async fn fetch_all<C, F>(&self, collection: &C, order: F) -> Result<Vec<C::Item>>
    where
        C: PagedCollection,
        F: Fn(&C::Item, &C::Item) -> Ordering,
    {
        let what = collection.describe();
        let count = collection.count().await?;

        if count > self.max_result_count {
            return Err(QueryError::ResultTooLarge {
                what,
                count,
                limit: self.max_result_count,
            }
            .into());
        }

        let windows = self.plan(count);
        log::debug!(
            "Fetching {} entries of {} in {} window(s)",
            count,
            what,
            windows.len()
        );

        let pages = fan_out(
            &format!("fetch {}", what),
            windows,
            self.max_concurrent_requests,
            |window| {
                let what = &what;
                async move {
                    collection.page(window).await.map_err(|err| {
                        log::error!("Failed to fetch {} ({}): {:#}", what, window, err);
                        err.context(format!("window {}", window))
                    })
                }
            },
        )
        .await?;

        let mut items: Vec<C::Item> = pages.into_iter().flatten().collect();
        items.sort_by(|a, b| order(a, b));
        Ok(items)
    }
}

impl Default for PaginatedFetcher {
    fn default() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            max_result_count: Self::DEFAULT_MAX_RESULT_COUNT,
            max_concurrent_requests: Self::DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Mutex;

    /// Collection that fabricates purl-like entries and records every request
    struct RecordingCollection {
        count: usize,
        failing_offset: Option<usize>,
        count_calls: AtomicUsize,
        windows: Mutex<Vec<PageWindow>>,
    }

    impl RecordingCollection {
        fn new(count: usize) -> Self {
            Self {
                count,
                failing_offset: None,
                count_calls: AtomicUsize::new(0),
                windows: Mutex::new(Vec::new()),
            }
        }

        fn failing_at(mut self, offset: usize) -> Self {
            self.failing_offset = Some(offset);
            self
        }

        fn requested_windows(&self) -> Vec<PageWindow> {
            let mut windows = self.windows.lock().unwrap().clone();
            windows.sort();
            windows
        }
    }

    #[async_trait]
    impl PagedCollection for RecordingCollection {
        type Item = String;

        fn describe(&self) -> String {
            "components name=curl".to_string()
        }

        async fn count(&self) -> Result<usize> {
            self.count_calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(self.count)
        }

        async fn page(&self, window: PageWindow) -> Result<Vec<String>> {
            self.windows.lock().unwrap().push(window);
            if self.failing_offset == Some(window.offset) {
                anyhow::bail!("502 Bad Gateway");
            }
            let end = (window.offset + window.limit).min(self.count);
            // reversed within the page so that sorting is observable
            Ok((window.offset..end)
                .rev()
                .map(|i| format!("pkg:rpm/redhat/component-{:05}", i))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_fetch_all_requests_exact_windows() {
        let collection = RecordingCollection::new(3600);
        let fetcher = PaginatedFetcher::default();

        let items = fetcher
            .fetch_all(&collection, |a, b| a.cmp(b))
            .await
            .unwrap();

        assert_eq!(items.len(), 3600);
        assert_eq!(
            collection.requested_windows(),
            vec![
                PageWindow::new(0, 1200),
                PageWindow::new(1200, 1200),
                PageWindow::new(2400, 1200),
            ]
        );
        assert_eq!(items.first().unwrap(), "pkg:rpm/redhat/component-00000");
        assert_eq!(items.last().unwrap(), "pkg:rpm/redhat/component-03599");
        assert!(items.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[tokio::test]
    async fn test_fetch_all_aborts_when_too_large() {
        let collection = RecordingCollection::new(60_000);
        let fetcher = PaginatedFetcher::default();

        let err = fetcher
            .fetch_all(&collection, |a, b| a.cmp(b))
            .await
            .unwrap_err();

        match err.downcast_ref::<QueryError>() {
            Some(QueryError::ResultTooLarge { count, limit, .. }) => {
                assert_eq!(*count, 60_000);
                assert_eq!(*limit, 50_000);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(collection.count_calls.load(AtomicOrdering::SeqCst), 1);
        assert!(collection.requested_windows().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_at_limit_is_allowed() {
        let collection = RecordingCollection::new(10);
        let fetcher = PaginatedFetcher::new(4, 10, 2).unwrap();

        let items = fetcher
            .fetch_all(&collection, |a, b| a.cmp(b))
            .await
            .unwrap();

        assert_eq!(items.len(), 10);
        assert_eq!(collection.requested_windows().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_failed_window_returns_no_partial_result() {
        let collection = RecordingCollection::new(3600).failing_at(1200);
        let fetcher = PaginatedFetcher::default();

        let err = fetcher
            .fetch_all(&collection, |a, b| a.cmp(b))
            .await
            .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("offset=1200"));
        assert!(message.contains("502 Bad Gateway"));
        assert!(err
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<QueryError>(), Some(QueryError::FanOutFailure { .. }))));
    }

    #[tokio::test]
    async fn test_fetch_all_empty_collection() {
        let collection = RecordingCollection::new(0);
        let items = PaginatedFetcher::default()
            .fetch_all(&collection, |a, b| a.cmp(b))
            .await
            .unwrap();
        assert!(items.is_empty());
        assert!(collection.requested_windows().is_empty());
    }

    #[test]
    fn test_new_rejects_zero_values() {
        assert!(PaginatedFetcher::new(0, 50_000, 16).is_err());
        assert!(PaginatedFetcher::new(1200, 0, 16).is_err());
        assert!(PaginatedFetcher::new(1200, 50_000, 0).is_err());
    }

    #[test]
    fn test_default_settings() {
        let fetcher = PaginatedFetcher::default();
        assert_eq!(fetcher.page_size(), 1200);
        assert_eq!(fetcher.max_result_count(), 50_000);
        assert_eq!(fetcher.max_concurrent_requests(), 16);
        assert_eq!(fetcher.plan(3600).len(), 3);
    }
}
