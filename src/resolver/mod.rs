// src/resolver/mod.rs
//! Category membership resolution over a [`PaginatedFetcher`].
//!
//! Listings are lazy streams: nothing is requested until the caller pulls,
//! and dropping the stream stops the walk. Category counts are memoized on
//! the [`Category`] value they were fetched for.

mod query;
mod traversal;

pub use query::{MemberQuery, Recurse};
pub use traversal::MemberStream;

use crate::api::PaginatedFetcher;
use crate::constants::HIDDEN_CATEGORIES_MARKER;
use crate::error::AppError;
use crate::types::{Category, CategoryInfo, Namespace, PageRef};
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;
use traversal::{MemberKind, Plan, Traversal};

/// Answers membership questions about categories of one wiki.
#[derive(Clone)]
pub struct MembershipResolver {
    fetcher: Arc<dyn PaginatedFetcher>,
    hidden_marker: PageRef,
}

impl MembershipResolver {
    pub fn new(fetcher: Arc<dyn PaginatedFetcher>) -> Self {
        Self {
            fetcher,
            hidden_marker: PageRef::new(Namespace::CATEGORY, HIDDEN_CATEGORIES_MARKER),
        }
    }

    /// Uses `marker` as the tracking category that hidden categories sit in.
    pub fn with_hidden_marker(mut self, marker: Category) -> Self {
        self.hidden_marker = marker.into_page();
        self
    }

    pub fn hidden_marker(&self) -> &PageRef {
        &self.hidden_marker
    }

    fn walk(
        &self,
        category: &Category,
        kind: MemberKind,
        query: MemberQuery,
    ) -> MemberStream<PageRef> {
        log::debug!("Listing {:?} of {} with {:?}", kind, category, query);
        Traversal::new(
            Arc::clone(&self.fetcher),
            category.page().clone(),
            Plan::new(kind, query),
        )
        .into_stream()
    }

    /// Members of `category` in any namespace the query allows.
    ///
    /// When recursing, members of subcategories follow the direct members,
    /// depth-first. Each category ref is yielded at most once; other pages
    /// reached through several subcategories are yielded once per path.
    /// Without a depth limit every category is listed at most once. Under
    /// one, a category is listed again only when a shorter path reaches it.
    pub fn members(&self, category: &Category, query: MemberQuery) -> MemberStream<PageRef> {
        self.walk(category, MemberKind::All, query)
    }

    /// Subcategories of `category`, each at most once.
    pub fn subcategories(
        &self,
        category: &Category,
        recurse: impl Into<Recurse>,
        total: Option<usize>,
    ) -> MemberStream<Category> {
        let mut query = MemberQuery::new().recurse(recurse);
        if let Some(total) = total {
            query = query.total(total);
        }
        self.walk(category, MemberKind::SubcategoriesOnly, query)
            .map(|item| item.and_then(|page| Ok(Category::try_from(page)?)))
            .boxed()
    }

    /// Non-category members of `category`.
    ///
    /// Recursion still walks through subcategories; they are just not yielded.
    pub fn articles(&self, category: &Category, query: MemberQuery) -> MemberStream<PageRef> {
        self.walk(category, MemberKind::ArticlesOnly, query)
    }

    pub async fn collect_members(
        &self,
        category: &Category,
        query: MemberQuery,
    ) -> Result<Vec<PageRef>, AppError> {
        self.members(category, query).try_collect().await
    }

    pub async fn collect_subcategories(
        &self,
        category: &Category,
        recurse: impl Into<Recurse>,
        total: Option<usize>,
    ) -> Result<Vec<Category>, AppError> {
        self.subcategories(category, recurse, total)
            .try_collect()
            .await
    }

    pub async fn collect_articles(
        &self,
        category: &Category,
        query: MemberQuery,
    ) -> Result<Vec<PageRef>, AppError> {
        self.articles(category, query).try_collect().await
    }

    /// Counts for `category`, fetched once per `Category` value.
    ///
    /// A failed fetch is not cached; the next call asks the remote again.
    pub async fn category_info(&self, category: &Category) -> Result<CategoryInfo, AppError> {
        let page = category.page();
        category
            .info_cell()
            .get_or_try_init(|| async {
                log::debug!("Fetching category info for {}", page);
                self.fetcher.fetch_category_info(page).await
            })
            .await
            .copied()
    }

    /// Whether `category` has no pages, files or subcategories.
    ///
    /// A category page that does not exist reports zero counts, so it is
    /// empty. A title the wiki rejects is an error.
    pub async fn is_empty_category(&self, category: &Category) -> Result<bool, AppError> {
        Ok(self.category_info(category).await?.is_empty())
    }

    /// Whether `category` is marked hidden on the wiki.
    pub async fn is_hidden_category(&self, category: &Category) -> Result<bool, AppError> {
        self.fetcher
            .is_member_of(category.page(), &self.hidden_marker)
            .await
    }
}
