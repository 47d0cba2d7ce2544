use thiserror::Error;

mod domain_types;
mod namespace;
mod page;

pub use domain_types::*;
pub use namespace::*;
pub use page::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid title: {title} - {reason}")]
    InvalidTitle { title: String, reason: String },

    #[error("{title} is not in the {expected} namespace")]
    WrongNamespace {
        title: String,
        expected: Namespace,
    },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid user agent: {reason}")]
    InvalidUserAgent { reason: String },
}
