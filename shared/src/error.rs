use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason reported for every non-success HTTP status.
pub const FETCH_ERROR_REASON: &str = "fetch-error";

/// Why a feed load did not produce a ride list.
///
/// The controller collapses every variant into the same error placeholder;
/// the variants only exist so diagnostics can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LoadError {
    /// The request never produced a response (connection refused, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// A response arrived but its body was not a ride array.
    #[error("malformed response body: {0}")]
    Malformed(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Response { status: u16 },
}

impl LoadError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Malformed(_) => "MALFORMED_BODY",
            Self::Response { .. } => "RESPONSE_ERROR",
        }
    }

    /// The reason string carried by a `Failed` outcome.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Transport(reason) | Self::Malformed(reason) => reason,
            Self::Response { .. } => FETCH_ERROR_REASON,
        }
    }

    #[must_use]
    pub const fn is_transport_level(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Malformed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("configuration is not valid JSON: {0}")]
    Parse(String),

    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("nearby threshold must be a finite, non-negative number of km (got {0})")]
    InvalidNearbyThreshold(f64),

    #[error("recent limit must be at least 1")]
    ZeroRecentLimit,

    #[error("notification dwell period must be greater than zero")]
    ZeroDwell,
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
