// src/lib.rs
//! wikicat library — resolves MediaWiki category membership, lazily and recursively.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `WikiErrorCode`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `ResolverConfig`
//! - **Domain types** — `PageRef`, `Category`, `CategoryInfo`, `Namespace`
//! - **Resolution** — `MembershipResolver`, `MemberQuery`, `Recurse`
//! - **API client** — `PaginatedFetcher`, `WikiHttpClient`, parsers
//! - **Output** — `render`, `deliver`, `OutputPlan`

mod api;
mod config;
mod constants;
mod error;
mod error_recovery;
mod output;
mod resolver;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result, WikiErrorCode};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Action, CommandLineInput, OutputFormat, ResolverConfig};

// --- Domain Types ---
pub use crate::types::{
    ApiEndpoint, Category, CategoryInfo, Namespace, NamespaceFilter, PageRef, UserAgent,
};

// --- Resolution ---
pub use crate::resolver::{MemberQuery, MemberStream, MembershipResolver, Recurse};

// --- API Client ---
pub use crate::api::{
    client::{extract_response_text, ApiResponse},
    parser::{parse_category_info, parse_members_batch, parse_membership},
    BatchPager, BatchRequest, ContinuationCursor, MemberBatch, PaginatedFetcher, WikiHttpClient,
};

// --- Output ---
pub use crate::output::{
    deliver, ensure_delivered, render, DeliveryTarget, OutputPlan, OutputReport, Outcome,
};

// --- Constants ---
pub use crate::constants::{
    DEFAULT_API_URL, DEFAULT_USER_AGENT, HIDDEN_CATEGORIES_MARKER, LOG_FILE_NAME,
    WIKI_API_BATCH_MAX,
};
