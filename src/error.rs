//! Error types for content fetching and date formatting

use thiserror::Error;

/// Errors raised by a [`ContentSource`](crate::content::ContentSource)
#[derive(Error, Debug)]
pub enum ContentError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("content API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// No document of the given type has this uid
    #[error("no {doc_type} document with uid {uid:?}")]
    NotFound { doc_type: String, uid: String },

    /// The response body did not match the expected shape
    #[error("failed to decode content API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A cursor or endpoint URL was malformed or pointed somewhere else
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ContentError {
    /// Whether this error means the document simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised while formatting dates
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateError {
    /// The timestamp could not be parsed in any supported layout
    #[error("unparseable timestamp: {0:?}")]
    Parse(String),

    /// Unknown locale name in the configuration
    #[error("unknown locale: {0}")]
    Locale(String),

    /// Unknown IANA timezone name in the configuration
    #[error("unknown timezone: {0}")]
    Timezone(String),
}
