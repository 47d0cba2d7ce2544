// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each variant tells what went wrong and where: a category that does not
//! resolve, a caller handing us nonsense, or the wiki/transport failing.

use std::fmt;
use thiserror::Error;

/// MediaWiki API error codes as a typed vocabulary.
///
/// The API reports failures as `{"error": {"code": "...", "info": "..."}}`.
/// Instead of matching against those strings throughout the code, the codes
/// we care about are encoded here and the rest fall through to `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiErrorCode {
    /// Too many requests from this client
    RateLimited,
    /// Replication lag exceeded the `maxlag` threshold
    MaxLag,
    /// The wiki is temporarily in read-only mode
    ReadOnly,
    /// `cmtitle` is not a valid category title
    InvalidCategory,
    /// The title is malformed
    InvalidTitle,
    /// The page does not exist
    MissingTitle,
    /// Anonymous read access is disabled on this wiki
    ReadApiDenied,
    /// A parameter had an unacceptable value
    BadValue,
    /// `internal_api_error_*`, an exception inside MediaWiki
    InternalError,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize
    Unknown(String),
}

impl WikiErrorCode {
    /// Parse an API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "ratelimited" => Self::RateLimited,
            "maxlag" => Self::MaxLag,
            "readonly" => Self::ReadOnly,
            "invalidcategory" => Self::InvalidCategory,
            "invalidtitle" => Self::InvalidTitle,
            "missingtitle" => Self::MissingTitle,
            "readapidenied" => Self::ReadApiDenied,
            "badvalue" => Self::BadValue,
            other if other.starts_with("internal_api_error") => Self::InternalError,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::MaxLag | Self::ReadOnly | Self::InternalError => true,
            Self::HttpStatus(status) => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Whether this error means the title simply doesn't resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::InvalidCategory | Self::InvalidTitle | Self::MissingTitle
        )
    }
}

impl fmt::Display for WikiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "ratelimited"),
            Self::MaxLag => write!(f, "maxlag"),
            Self::ReadOnly => write!(f, "readonly"),
            Self::InvalidCategory => write!(f, "invalidcategory"),
            Self::InvalidTitle => write!(f, "invalidtitle"),
            Self::MissingTitle => write!(f, "missingtitle"),
            Self::ReadApiDenied => write!(f, "readapidenied"),
            Self::BadValue => write!(f, "badvalue"),
            Self::InternalError => write!(f, "internal_api_error"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found on the remote wiki: {title}")]
    NotFound { title: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Wiki API returned an error ({code}): {message}")]
    WikiService {
        code: WikiErrorCode,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    /// Builds the error for an API failure about `title`, folding the
    /// "does not resolve" codes into [`AppError::NotFound`].
    pub fn from_wiki_error(code: WikiErrorCode, message: String, title: &str) -> Self {
        if code.is_not_found() {
            AppError::NotFound {
                title: title.to_string(),
            }
        } else {
            AppError::WikiService { code, message }
        }
    }

    /// Whether the HTTP client should try the request again.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::WikiService { code, .. } => code.is_retryable(),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
