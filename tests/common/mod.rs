// tests/common/mod.rs
//! An in-memory wiki that pages its listings and counts every remote call.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wikicat::{
    AppError, BatchRequest, Category, CategoryInfo, ContinuationCursor, MemberBatch,
    MembershipResolver, Namespace, PageRef, PaginatedFetcher, WikiErrorCode,
};

/// Page size used when a request does not ask for fewer.
pub const PAGE_SIZE: usize = 2;

#[derive(Default)]
pub struct InMemoryWiki {
    listings: HashMap<PageRef, Vec<PageRef>>,
    hidden: HashSet<PageRef>,
    invalid: HashSet<PageRef>,
    /// Listing of this category fails once this many batches were served.
    failing: Option<(PageRef, usize)>,
    served: Mutex<HashMap<PageRef, usize>>,
    pub batch_calls: AtomicUsize,
    pub info_calls: AtomicUsize,
    pub membership_calls: AtomicUsize,
    pub requests: Mutex<Vec<BatchRequest>>,
}

/// `"Category:Foo"` or `"Foo"` as a category ref.
pub fn cat(name: &str) -> PageRef {
    Category::new(name).unwrap().into_page()
}

/// Any other page, prefix parsed from the title.
pub fn page(title: &str) -> PageRef {
    PageRef::parse(title).unwrap()
}

pub fn category(name: &str) -> Category {
    Category::new(name).unwrap()
}

pub fn titles(pages: &[PageRef]) -> Vec<&str> {
    pages.iter().map(PageRef::title).collect()
}

impl InMemoryWiki {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, name: &str, members: &[&str]) -> Self {
        let members = members.iter().map(|title| page(title)).collect();
        self.listings.insert(cat(name), members);
        self
    }

    pub fn with_hidden(mut self, name: &str) -> Self {
        self.hidden.insert(cat(name));
        self
    }

    /// Treats `title` as a title the wiki rejects outright.
    pub fn with_invalid(mut self, title: &str) -> Self {
        self.invalid.insert(page(title));
        self
    }

    pub fn failing_after(mut self, name: &str, batches: usize) -> Self {
        self.failing = Some((cat(name), batches));
        self
    }

    pub fn into_resolver(self) -> (Arc<Self>, MembershipResolver) {
        let wiki = Arc::new(self);
        let fetcher: Arc<dyn PaginatedFetcher> = wiki.clone();
        (wiki, MembershipResolver::new(fetcher))
    }

    pub fn batches(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn infos(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    pub fn memberships(&self) -> usize {
        self.membership_calls.load(Ordering::SeqCst)
    }

    fn not_found(page: &PageRef) -> AppError {
        AppError::NotFound {
            title: page.title().to_string(),
        }
    }
}

#[async_trait::async_trait]
impl PaginatedFetcher for InMemoryWiki {
    async fn fetch_batch(&self, request: &BatchRequest) -> Result<MemberBatch, AppError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if self.invalid.contains(&request.category) {
            return Err(Self::not_found(&request.category));
        }

        let served = {
            let mut served = self.served.lock().unwrap();
            let count = served.entry(request.category.clone()).or_default();
            *count += 1;
            *count
        };
        if let Some((failing, after)) = &self.failing {
            if failing == &request.category && served > *after {
                return Err(AppError::WikiService {
                    code: WikiErrorCode::HttpStatus(503),
                    message: "HTTP 503 Service Unavailable".to_string(),
                });
            }
        }

        // Nonexistent categories list as empty, like the real API.
        let listing = self.listings.get(&request.category).cloned().unwrap_or_default();
        let matching: Vec<PageRef> = listing
            .into_iter()
            .filter(|p| {
                request
                    .namespaces
                    .as_ref()
                    .map_or(true, |f| f.contains(p.namespace()))
            })
            .collect();

        let offset: usize = request
            .cursor
            .as_ref()
            .map(|c| c.as_str().parse().unwrap())
            .unwrap_or(0);
        let end = (offset + request.limit.min(PAGE_SIZE)).min(matching.len());
        let items = matching[offset.min(end)..end].to_vec();
        let next_cursor = (end < matching.len()).then(|| ContinuationCursor::new(end.to_string()));

        Ok(MemberBatch { items, next_cursor })
    }

    async fn fetch_category_info(&self, category: &PageRef) -> Result<CategoryInfo, AppError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);

        if self.invalid.contains(category) {
            return Err(Self::not_found(category));
        }
        // A category nobody created reports zero counts.
        let members = self.listings.get(category).cloned().unwrap_or_default();

        let mut info = CategoryInfo::default();
        for member in &members {
            match member.namespace() {
                Namespace::CATEGORY => info.subcats += 1,
                Namespace::FILE => info.files += 1,
                _ => info.pages += 1,
            }
        }
        info.size = info.member_total();
        Ok(info)
    }

    async fn is_member_of(&self, page: &PageRef, marker: &PageRef) -> Result<bool, AppError> {
        self.membership_calls.fetch_add(1, Ordering::SeqCst);
        if marker.title() != wikicat::HIDDEN_CATEGORIES_MARKER {
            return Ok(false);
        }
        Ok(self.hidden.contains(page))
    }
}

/// Legal policies with two direct pages and one subcategory.
pub fn legal_policies_wiki() -> InMemoryWiki {
    InMemoryWiki::new()
        .with_category(
            "Wikipedia legal policies",
            &[
                "Wikipedia:Disclaimers",
                "Wikipedia:Copyrights",
                "Category:Wikipedia copyright",
                "Wikipedia talk:Disclaimers",
            ],
        )
        .with_category(
            "Wikipedia copyright",
            &[
                "Wikipedia:Non-free content",
                "Category:Wikipedia image copyright",
            ],
        )
        .with_category(
            "Wikipedia image copyright",
            &["Wikipedia:Image use policy", "File:Copyright-problem.svg"],
        )
}
