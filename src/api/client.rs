// src/api/client.rs
//! HTTP client for the MediaWiki Action API.
//!
//! This module provides a thin wrapper around reqwest for making `api.php`
//! requests. It builds query strings and retries transient failures, and
//! hands response bodies to the parser without interpreting them itself.

use super::{parser, BatchRequest, MemberBatch, PaginatedFetcher};
use crate::constants::WIKI_API_CONTINUE_MARKER;
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::types::{ApiEndpoint, CategoryInfo, PageRef, UserAgent};
use reqwest::{header, Client, Response};
use std::time::Duration;

/// Query parameters for one request, in the order they are sent.
type Params = Vec<(&'static str, String)>;

/// A thin wrapper around reqwest Client for `api.php` requests.
#[derive(Clone)]
pub struct WikiHttpClient {
    client: Client,
    endpoint: ApiEndpoint,
    retry: RetryPolicy,
}

impl WikiHttpClient {
    /// Creates a new HTTP client for the wiki at `endpoint`.
    pub fn new(
        endpoint: ApiEndpoint,
        user_agent: &UserAgent,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(user_agent)?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy applied to transient API errors.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Creates the default headers for API requests.
    fn create_headers(user_agent: &UserAgent) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(user_agent.as_str()).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid user agent: {}", e))
            })?,
        );

        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to `api.php` with the given parameters.
    ///
    /// `format=json&formatversion=2` is always sent first.
    pub async fn get(&self, params: &[(&str, String)]) -> Result<Response, AppError> {
        let mut url = self.endpoint.as_url().clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("formatversion", "2")
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));

        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        log::debug!("Response status: {}", response.status());

        Ok(response)
    }

    /// Runs a query, retrying transient API errors, and parses the result.
    async fn query<T, P>(&self, params: Params, parse: P) -> Result<T, AppError>
    where
        P: Fn(ApiResponse<String>) -> Result<T, AppError>,
    {
        let client = self;
        let params = &params;
        let parse = &parse;
        retry_with_backoff(
            move || async move {
                let response = client.get(params).await?;
                let result = extract_response_text(response).await?;
                parse(result)
            },
            &self.retry,
            AppError::is_retryable,
        )
        .await
    }
}

/// Parameters of a `list=categorymembers` request.
fn member_listing_params(request: &BatchRequest) -> Params {
    let mut params: Params = vec![
        ("action", "query".to_string()),
        ("list", "categorymembers".to_string()),
        ("cmtitle", request.category.title().to_string()),
        ("cmprop", "ids|title".to_string()),
        ("cmlimit", request.limit.to_string()),
    ];
    if let Some(namespaces) = &request.namespaces {
        params.push(("cmnamespace", namespaces.to_api_param()));
    }
    if let Some(cursor) = &request.cursor {
        params.push(("cmcontinue", cursor.as_str().to_string()));
        params.push(("continue", WIKI_API_CONTINUE_MARKER.to_string()));
    }
    params
}

#[async_trait::async_trait]
impl PaginatedFetcher for WikiHttpClient {
    async fn fetch_batch(&self, request: &BatchRequest) -> Result<MemberBatch, AppError> {
        let category = &request.category;
        self.query(member_listing_params(request), |result| {
            parser::parse_members_batch(result, category)
        })
        .await
    }

    async fn fetch_category_info(&self, category: &PageRef) -> Result<CategoryInfo, AppError> {
        let params = vec![
            ("action", "query".to_string()),
            ("prop", "categoryinfo".to_string()),
            ("titles", category.title().to_string()),
        ];
        self.query(params, |result| parser::parse_category_info(result, category))
            .await
    }

    async fn is_member_of(&self, page: &PageRef, marker: &PageRef) -> Result<bool, AppError> {
        let params = vec![
            ("action", "query".to_string()),
            ("prop", "categories".to_string()),
            ("titles", page.title().to_string()),
            ("clcategories", marker.title().to_string()),
        ];
        self.query(params, |result| parser::parse_membership(result, page))
            .await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
