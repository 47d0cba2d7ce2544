// src/api/pagination.rs
//! Cursor-driven paging over one category listing, one batch per pull.

use super::{BatchRequest, ContinuationCursor, PaginatedFetcher};
use crate::constants::WIKI_API_BATCH_MAX;
use crate::error::AppError;
use crate::types::{NamespaceFilter, PageRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerState {
    /// Nothing fetched yet
    Fresh,
    /// The remote handed back a cursor
    Continuing,
    Exhausted,
}

/// Walks the member listing of a single category.
///
/// Nothing is fetched until [`BatchPager::next_batch`] is called, and each
/// call makes at most one remote request.
#[derive(Debug, Clone)]
pub struct BatchPager {
    category: PageRef,
    namespaces: Option<NamespaceFilter>,
    cursor: Option<ContinuationCursor>,
    state: PagerState,
    batches_fetched: u32,
}

impl BatchPager {
    pub fn new(category: PageRef, namespaces: Option<NamespaceFilter>) -> Self {
        Self {
            category,
            namespaces,
            cursor: None,
            state: PagerState::Fresh,
            batches_fetched: 0,
        }
    }

    pub fn category(&self) -> &PageRef {
        &self.category
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == PagerState::Exhausted
    }

    pub fn batches_fetched(&self) -> u32 {
        self.batches_fetched
    }

    /// Fetches the next batch, or `None` once the listing is complete.
    ///
    /// `wanted` caps the batch size requested from the remote; it is clamped
    /// to what the API accepts. On error the pager keeps its position.
    pub async fn next_batch(
        &mut self,
        fetcher: &dyn PaginatedFetcher,
        wanted: Option<usize>,
    ) -> Result<Option<Vec<PageRef>>, AppError> {
        if self.state == PagerState::Exhausted {
            return Ok(None);
        }

        // An empty filter matches nothing; don't ask the remote.
        if self.namespaces.as_ref().is_some_and(NamespaceFilter::is_empty) {
            log::debug!("Empty namespace filter for {}, skipping listing", self.category);
            self.state = PagerState::Exhausted;
            return Ok(None);
        }

        let request = BatchRequest {
            category: self.category.clone(),
            namespaces: self.namespaces.clone(),
            cursor: self.cursor.clone(),
            limit: wanted
                .unwrap_or(WIKI_API_BATCH_MAX)
                .clamp(1, WIKI_API_BATCH_MAX),
        };

        let batch = fetcher.fetch_batch(&request).await?;
        self.batches_fetched += 1;

        log::debug!(
            "Batch {} of {}: {} items{}",
            self.batches_fetched,
            self.category,
            batch.items.len(),
            if batch.is_last() { " (last)" } else { "" }
        );

        self.state = if batch.is_last() {
            PagerState::Exhausted
        } else {
            PagerState::Continuing
        };
        self.cursor = batch.next_cursor;

        Ok(Some(batch.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemberBatch;
    use crate::types::{CategoryInfo, Namespace};
    use std::sync::Mutex;

    /// Serves three fixed batches and records every request it sees.
    struct ScriptedFetcher {
        requests: Mutex<Vec<BatchRequest>>,
    }

    impl ScriptedFetcher {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl PaginatedFetcher for ScriptedFetcher {
        async fn fetch_batch(&self, request: &BatchRequest) -> Result<MemberBatch, AppError> {
            self.requests.lock().unwrap().push(request.clone());
            let (title, next) = match request.cursor.as_ref().map(|c| c.as_str()) {
                None => ("A", Some("b")),
                Some("b") => ("B", Some("c")),
                Some(_) => ("C", None),
            };
            Ok(MemberBatch {
                items: vec![PageRef::new(Namespace::MAIN, title)],
                next_cursor: next.map(ContinuationCursor::new),
            })
        }

        async fn fetch_category_info(&self, _: &PageRef) -> Result<CategoryInfo, AppError> {
            unreachable!("pager never asks for counts")
        }

        async fn is_member_of(&self, _: &PageRef, _: &PageRef) -> Result<bool, AppError> {
            unreachable!("pager never checks membership")
        }
    }

    fn root() -> PageRef {
        PageRef::new(Namespace::CATEGORY, "Category:Root")
    }

    #[tokio::test]
    async fn follows_cursors_until_exhausted() {
        let fetcher = ScriptedFetcher::new();
        let mut pager = BatchPager::new(root(), None);

        let mut titles = Vec::new();
        while let Some(items) = pager.next_batch(&fetcher, None).await.unwrap() {
            titles.extend(items.into_iter().map(|p| p.title().to_string()));
        }

        assert_eq!(titles, vec!["A", "B", "C"]);
        assert!(pager.is_exhausted());
        assert_eq!(pager.batches_fetched(), 3);

        let requests = fetcher.requests.lock().unwrap();
        assert_eq!(requests[0].cursor, None);
        assert_eq!(requests[1].cursor, Some(ContinuationCursor::new("b")));
        assert_eq!(requests[2].cursor, Some(ContinuationCursor::new("c")));
    }

    #[tokio::test]
    async fn exhausted_pager_makes_no_requests() {
        let fetcher = ScriptedFetcher::new();
        let mut pager = BatchPager::new(root(), None);
        while pager.next_batch(&fetcher, None).await.unwrap().is_some() {}

        assert_eq!(pager.next_batch(&fetcher, None).await.unwrap(), None);
        assert_eq!(fetcher.requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn clamps_requested_batch_size() {
        let fetcher = ScriptedFetcher::new();
        let mut pager = BatchPager::new(root(), None);

        pager.next_batch(&fetcher, Some(0)).await.unwrap();
        pager.next_batch(&fetcher, Some(10_000)).await.unwrap();
        pager.next_batch(&fetcher, Some(7)).await.unwrap();

        let limits: Vec<usize> = fetcher
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.limit)
            .collect();
        assert_eq!(limits, vec![1, WIKI_API_BATCH_MAX, 7]);
    }

    #[tokio::test]
    async fn empty_namespace_filter_lists_nothing() {
        let fetcher = ScriptedFetcher::new();
        let mut pager = BatchPager::new(root(), Some(NamespaceFilter::default()));

        assert_eq!(pager.next_batch(&fetcher, None).await.unwrap(), None);
        assert!(fetcher.requests.lock().unwrap().is_empty());
    }
}
