//! API error taxonomy.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Coarse classification of API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// The request never produced a response.
    Network,
    /// The server answered with a non-success status.
    Http,
    /// A body could not be encoded or decoded.
    Codec,
    /// Client-side misconfiguration.
    Config,
}

/// Errors surfaced by [`ApiClient`](crate::ApiClient).
///
/// Nothing is swallowed at this layer: every failed request reaches the
/// caller as one of these variants, after the loading indicator has been
/// dismissed and any logout broadcast has gone out.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{method} {url} returned status {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
        /// Raw response body, kept for caller-side diagnostics.
        body: String,
    },

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Status { .. } => ApiErrorCategory::Http,
            Self::Encode(_) | Self::Decode(_) => ApiErrorCategory::Codec,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Status code of the failing response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_variants() {
        assert_eq!(ApiError::Network("down".into()).category(), ApiErrorCategory::Network);
        assert_eq!(ApiError::Config("bad".into()).category(), ApiErrorCategory::Config);
        assert_eq!(ApiError::Decode("bad json".into()).category(), ApiErrorCategory::Codec);

        let err = ApiError::Status {
            method: Method::GET,
            url: "http://localhost/api/songs".into(),
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert_eq!(err.category(), ApiErrorCategory::Http);
    }

    #[test]
    fn status_accessor_only_applies_to_http_errors() {
        let err = ApiError::Status {
            method: Method::POST,
            url: "http://localhost/api/me".into(),
            status: StatusCode::BAD_REQUEST,
            body: "nope".into(),
        };
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(ApiError::Network("down".into()).status(), None);
    }

    #[test]
    fn display_includes_method_url_and_status() {
        let err = ApiError::Status {
            method: Method::GET,
            url: "http://localhost/api/songs".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("GET"));
        assert!(rendered.contains("/api/songs"));
        assert!(rendered.contains("500"));
    }
}
