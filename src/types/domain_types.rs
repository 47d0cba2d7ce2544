// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use url::Url;

/// Location of a wiki's `api.php`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint(Url);

impl ApiEndpoint {
    /// Create a new endpoint, accepting only http(s) URLs
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                if parsed_url.query().is_some() {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "The endpoint must not carry query parameters".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-Agent header value sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent(String);

impl UserAgent {
    pub fn new(agent: impl Into<String>) -> Result<Self, ValidationError> {
        let agent = agent.into();

        if agent.trim().is_empty() {
            return Err(ValidationError::InvalidUserAgent {
                reason: "User agent cannot be empty".to_string(),
            });
        }

        if agent.chars().any(|c| c.is_control()) {
            return Err(ValidationError::InvalidUserAgent {
                reason: "User agent cannot contain control characters".to_string(),
            });
        }

        Ok(Self(agent))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
