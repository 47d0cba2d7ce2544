// src/api/parser.rs
//! Turns raw API responses into domain values.
//!
//! Parsing is pure: it sees the status code and body the client received
//! and nothing else, so fixtures exercise exactly the code live responses do.

use super::client::ApiResponse;
use super::responses::{ApiEnvelope, CategoryMembersQuery, PageEntry, PagesQuery};
use super::{ContinuationCursor, MemberBatch};
use crate::error::{AppError, WikiErrorCode};
use crate::types::{CategoryInfo, Namespace, PageRef};
use serde::de::DeserializeOwned;

/// Parse any API response envelope, surfacing wiki errors about `subject`.
pub fn parse_api_response<T>(
    result: &ApiResponse<String>,
    subject: &PageRef,
) -> Result<ApiEnvelope<T>, AppError>
where
    T: DeserializeOwned,
{
    let envelope: Result<ApiEnvelope<T>, _> = serde_json::from_str(&result.data);

    if !result.status.is_success() {
        // Some wikis send a proper error envelope with a non-2xx status.
        if let Ok(ApiEnvelope {
            error: Some(error), ..
        }) = envelope
        {
            return Err(AppError::from_wiki_error(
                WikiErrorCode::from_api_response(&error.code),
                error.info,
                subject.title(),
            ));
        }
        return Err(AppError::WikiService {
            code: WikiErrorCode::from_http_status(result.status.as_u16()),
            message: format!("HTTP {} from {}", result.status, result.url),
        });
    }

    let envelope = envelope.map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(&result.data)))
    })?;

    if let Some(error) = envelope.error {
        return Err(AppError::from_wiki_error(
            WikiErrorCode::from_api_response(&error.code),
            error.info,
            subject.title(),
        ));
    }

    Ok(envelope)
}

/// Parse a `list=categorymembers` response into a batch.
pub fn parse_members_batch(
    result: ApiResponse<String>,
    category: &PageRef,
) -> Result<MemberBatch, AppError> {
    let envelope = parse_api_response::<CategoryMembersQuery>(&result, category)?;

    let items = envelope
        .query
        .map(|q| q.categorymembers)
        .unwrap_or_default()
        .into_iter()
        .map(|entry| PageRef::new(Namespace::new(entry.ns), entry.title))
        .collect();

    let next_cursor = envelope
        .continuation
        .and_then(|c| c.cmcontinue)
        .map(ContinuationCursor::new);

    Ok(MemberBatch { items, next_cursor })
}

/// Parse a `prop=categoryinfo` response.
///
/// A page without `categoryinfo` has never had members and counts as all
/// zeros, whether or not the category page itself exists. Invalid titles
/// are `NotFound`.
pub fn parse_category_info(
    result: ApiResponse<String>,
    category: &PageRef,
) -> Result<CategoryInfo, AppError> {
    let page = single_page(&result, category)?;

    if page.missing && page.categoryinfo.is_none() {
        log::debug!("{} has no category page and no members", category);
    }
    Ok(page.categoryinfo.unwrap_or_default())
}

/// Parse a `prop=categories&clcategories=<marker>` response.
pub fn parse_membership(result: ApiResponse<String>, page: &PageRef) -> Result<bool, AppError> {
    let entry = single_page(&result, page)?;
    Ok(!entry.categories.is_empty())
}

/// Extracts the one page a `titles=` query asked about.
fn single_page(result: &ApiResponse<String>, subject: &PageRef) -> Result<PageEntry, AppError> {
    let envelope = parse_api_response::<PagesQuery>(result, subject)?;

    let page = envelope
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| {
            AppError::MalformedResponse(format!("no page entry for {} in response", subject))
        })?;

    if page.invalid {
        log::debug!(
            "{} is not a valid title: {}",
            subject,
            page.invalidreason.as_deref().unwrap_or("no reason given")
        );
        return Err(AppError::NotFound {
            title: subject.title().to_string(),
        });
    }

    Ok(page)
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(crate::constants::ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
