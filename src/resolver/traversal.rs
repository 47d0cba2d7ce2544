// src/resolver/traversal.rs
//! Depth-first walk over a category graph, one remote batch at a time.
//!
//! The walk keeps an explicit stack of frames instead of recursing, so a
//! category that transitively contains itself only costs one visited-set
//! lookup. Each frame lists one category to the end before its
//! subcategories are entered, in the order they were discovered.
//!
//! Under a depth limit a category can first be reached down a long path and
//! later through a shorter one. The visited set remembers the budget each
//! category was entered with, and a category is entered again only with a
//! strictly larger budget, so budgets only grow and the walk still ends.

use super::query::{MemberQuery, Recurse};
use crate::api::{BatchPager, PaginatedFetcher};
use crate::error::AppError;
use crate::types::{Namespace, NamespaceFilter, PageRef};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Lazy, fallible sequence of listing results.
pub type MemberStream<T> = BoxStream<'static, Result<T, AppError>>;

/// Which members a traversal yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberKind {
    All,
    SubcategoriesOnly,
    ArticlesOnly,
}

#[derive(Debug, Clone)]
pub(crate) struct Plan {
    kind: MemberKind,
    query: MemberQuery,
}

impl Plan {
    pub(crate) fn new(kind: MemberKind, query: MemberQuery) -> Self {
        Self { kind, query }
    }

    fn passes_filter(&self, page: &PageRef) -> bool {
        self.query
            .namespace_filter()
            .map_or(true, |filter| filter.contains(page.namespace()))
    }

    fn emits(&self, page: &PageRef) -> bool {
        match self.kind {
            MemberKind::SubcategoriesOnly => page.is_category(),
            MemberKind::ArticlesOnly => !page.is_category() && self.passes_filter(page),
            MemberKind::All => self.passes_filter(page),
        }
    }

    /// False when no page could ever pass the filter.
    fn can_emit(&self) -> bool {
        match (self.kind, self.query.namespace_filter()) {
            (MemberKind::SubcategoriesOnly, _) | (_, None) => true,
            (MemberKind::All, Some(filter)) => !filter.is_empty(),
            (MemberKind::ArticlesOnly, Some(filter)) => {
                filter.iter().any(|ns| ns != Namespace::CATEGORY)
            }
        }
    }

    /// Server-side restriction for one listing.
    ///
    /// A frame that descends always needs to see its subcategory edges,
    /// whatever the caller filters on.
    fn fetch_filter(&self, descending: bool) -> Option<NamespaceFilter> {
        let base = match self.kind {
            MemberKind::SubcategoriesOnly => Some(NamespaceFilter::single(Namespace::CATEGORY)),
            MemberKind::All | MemberKind::ArticlesOnly => self.query.namespace_filter().cloned(),
        };
        if descending {
            base.map(|filter| filter.with(Namespace::CATEGORY))
        } else {
            base
        }
    }

    fn dedupes_categories(&self) -> bool {
        self.query.recursion().can_descend()
    }
}

/// One category being listed.
struct Frame {
    pager: BatchPager,
    recurse: Recurse,
    /// Subcategories found in this listing, entered once it is exhausted.
    pending: VecDeque<PageRef>,
}

pub(crate) struct Traversal {
    fetcher: Arc<dyn PaginatedFetcher>,
    plan: Plan,
    stack: Vec<Frame>,
    ready: VecDeque<PageRef>,
    /// Largest budget each category was entered or queued with.
    visited: HashMap<PageRef, Recurse>,
    emitted_categories: HashSet<PageRef>,
    yielded: usize,
    finished: bool,
}

impl Traversal {
    pub(crate) fn new(fetcher: Arc<dyn PaginatedFetcher>, root: PageRef, plan: Plan) -> Self {
        let recurse = plan.query.recursion();
        let mut traversal = Self {
            fetcher,
            stack: Vec::new(),
            ready: VecDeque::new(),
            visited: HashMap::from([(root.clone(), recurse)]),
            emitted_categories: HashSet::new(),
            yielded: 0,
            finished: !plan.can_emit(),
            plan,
        };
        traversal.enter(root, recurse);
        traversal
    }

    pub(crate) fn into_stream(self) -> MemberStream<PageRef> {
        stream::unfold(self, |mut traversal| async move {
            let item = traversal.next_item().await?;
            Some((item, traversal))
        })
        .boxed()
    }

    fn enter(&mut self, category: PageRef, recurse: Recurse) {
        log::debug!(
            "Entering {} (depth {} on the stack, {:?})",
            category,
            self.stack.len(),
            recurse
        );
        let filter = self.plan.fetch_filter(recurse.can_descend());
        self.stack.push(Frame {
            pager: BatchPager::new(category, filter),
            recurse,
            pending: VecDeque::new(),
        });
    }

    fn remaining(&self) -> Option<usize> {
        self.plan
            .query
            .total_cap()
            .map(|total| total.saturating_sub(self.yielded))
    }

    fn finish(&mut self) {
        if !self.finished {
            log::debug!(
                "Traversal finished after {} items, {} categories visited",
                self.yielded,
                self.visited.len()
            );
        }
        self.finished = true;
        self.stack.clear();
        self.ready.clear();
    }

    async fn next_item(&mut self) -> Option<Result<PageRef, AppError>> {
        loop {
            if self.finished {
                return None;
            }
            if self.remaining() == Some(0) {
                self.finish();
                return None;
            }
            if let Some(page) = self.ready.pop_front() {
                self.yielded += 1;
                return Some(Ok(page));
            }

            let wanted = self.remaining();
            let Some(frame) = self.stack.last_mut() else {
                self.finish();
                return None;
            };

            if !frame.pager.is_exhausted() {
                let batch = frame.pager.next_batch(self.fetcher.as_ref(), wanted).await;
                match batch {
                    Ok(Some(items)) => self.absorb(items),
                    Ok(None) => {}
                    Err(e) => {
                        log::debug!("Listing failed, ending traversal: {}", e);
                        self.finish();
                        return Some(Err(e));
                    }
                }
                continue;
            }

            if let Some(subcategory) = frame.pending.pop_front() {
                let recurse = frame.recurse.descend();
                // A shorter path queued it since; that entry covers this one.
                if self.visited.get(&subcategory) == Some(&recurse) {
                    self.enter(subcategory, recurse);
                }
            } else {
                self.stack.pop();
            }
        }
    }

    /// Queues what a batch yields and records the subcategories to descend into.
    fn absorb(&mut self, items: Vec<PageRef>) {
        let budget = self
            .stack
            .last()
            .filter(|frame| frame.recurse.can_descend())
            .map(|frame| frame.recurse.descend());

        let mut discovered = Vec::new();
        for page in items {
            if let Some(budget) = budget.filter(|_| page.is_category()) {
                if self.claim(&page, budget) {
                    discovered.push(page.clone());
                }
            }
            if self.plan.emits(&page) && self.first_emission(&page) {
                self.ready.push_back(page);
            }
        }

        if let Some(frame) = self.stack.last_mut() {
            frame.pending.extend(discovered);
        }
    }

    /// Records `budget` for `category` unless it was already reached with
    /// at least as much.
    fn claim(&mut self, category: &PageRef, budget: Recurse) -> bool {
        match self.visited.get(category) {
            Some(known) if !budget.outreaches(*known) => false,
            _ => {
                self.visited.insert(category.clone(), budget);
                true
            }
        }
    }

    fn first_emission(&mut self, page: &PageRef) -> bool {
        if !page.is_category() || !self.plan.dedupes_categories() {
            return true;
        }
        self.emitted_categories.insert(page.clone())
    }
}
