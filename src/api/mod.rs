// src/api/mod.rs
//! Wiki API interaction: the ability to list category members remotely.
//!
//! This module keeps I/O, parsing, and paging apart: `client` speaks HTTP,
//! `parser` turns response bodies into domain values, and `pagination`
//! walks one listing a batch at a time.

pub mod client;
pub mod pagination;
pub mod parser;
mod responses;

use crate::error::AppError;
use crate::types::{CategoryInfo, NamespaceFilter, PageRef};
use std::fmt;

/// Opaque token that resumes a listing where the previous batch stopped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContinuationCursor(String);

impl ContinuationCursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One request for a batch of category members.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub category: PageRef,
    /// Server-side namespace restriction; `None` lists every namespace.
    pub namespaces: Option<NamespaceFilter>,
    pub cursor: Option<ContinuationCursor>,
    /// Upper bound on items wanted in this batch.
    pub limit: usize,
}

/// Members returned by one listing request, in remote order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberBatch {
    pub items: Vec<PageRef>,
    /// `None` means the listing is complete.
    pub next_cursor: Option<ContinuationCursor>,
}

impl MemberBatch {
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// The ability to read category structure from a wiki.
///
/// This is the fundamental algebra for remote access. The membership
/// resolver depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait PaginatedFetcher: Send + Sync {
    /// Fetches one batch of members of `request.category`.
    ///
    /// Fails with [`AppError::NotFound`] when the category does not resolve.
    async fn fetch_batch(&self, request: &BatchRequest) -> Result<MemberBatch, AppError>;

    /// Fetches the aggregate counts of a category.
    async fn fetch_category_info(&self, category: &PageRef) -> Result<CategoryInfo, AppError>;

    /// Whether `page` is a direct member of the `marker` category.
    async fn is_member_of(&self, page: &PageRef, marker: &PageRef) -> Result<bool, AppError>;
}

// Re-export the public interface
pub use client::WikiHttpClient;
pub use pagination::BatchPager;
