// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role: how much one listing request asks for, how hard we try
//! again when the wiki pushes back, and which wiki we talk to by default.

use std::time::Duration;

// ---------------------------------------------------------------------------
// MediaWiki API boundaries
// ---------------------------------------------------------------------------

/// Largest `cmlimit` an anonymous client may request per listing batch.
pub const WIKI_API_BATCH_MAX: usize = 500;

/// Value sent as `continue` alongside `cmcontinue` when resuming a listing.
pub const WIKI_API_CONTINUE_MARKER: &str = "-||";

/// Endpoint used when neither the CLI nor the environment names one.
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Wikimedia sites reject requests without a descriptive User-Agent.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "wikicat/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/wikicat/wikicat)"
);

/// Per-request timeout applied to the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Retry policy for transient API errors (maxlag, ratelimited, readonly)
// ---------------------------------------------------------------------------

pub const RETRY_MAX_ATTEMPTS: u32 = 3;
pub const RETRY_INITIAL_DELAY: Duration = Duration::from_millis(500);
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// Category conventions
// ---------------------------------------------------------------------------

/// Marker category that hidden categories are placed in.
///
/// MediaWiki adds every page carrying `__HIDDENCAT__` to this tracking
/// category. Non-English wikis translate the title, so it is configurable.
pub const HIDDEN_CATEGORIES_MARKER: &str = "Category:Hidden categories";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub const API_URL_ENV: &str = "WIKICAT_API_URL";
pub const USER_AGENT_ENV: &str = "WIKICAT_USER_AGENT";

/// Name of the debug log written to the temp directory.
pub const LOG_FILE_NAME: &str = "wikicat.log";
