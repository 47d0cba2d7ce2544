// src/api/responses.rs
//! Wire shapes of MediaWiki Action API responses (`formatversion=2`).
//!
//! Only the fields this crate reads are modeled; serde ignores the rest.

use crate::types::CategoryInfo;
use serde::Deserialize;

/// Top-level response envelope.
///
/// Every `action=query` response has this shape: an optional error, an
/// optional continuation block, and the module results under `query`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub error: Option<ApiErrorBody>,
    #[serde(rename = "continue")]
    pub continuation: Option<ContinueBlock>,
    pub query: Option<T>,
}

/// `{"error": {"code": "...", "info": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// Continuation parameters for the next request.
#[derive(Debug, Clone, Deserialize)]
pub struct ContinueBlock {
    pub cmcontinue: Option<String>,
}

/// `list=categorymembers` results
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMembersQuery {
    #[serde(default)]
    pub categorymembers: Vec<MemberEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberEntry {
    pub ns: i32,
    pub title: String,
}

/// `prop=...&titles=...` results
#[derive(Debug, Clone, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageEntry {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    pub invalidreason: Option<String>,
    pub categoryinfo: Option<CategoryInfo>,
    #[serde(default)]
    pub categories: Vec<MemberEntry>,
}
