//! Bearer-token handling: header injection and refreshed-token capture.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde_json::Value;
use tracing::debug;

use crate::storage::{KeyValueStore, TOKEN_KEY};

/// Build the `Authorization` header value from the stored token.
///
/// The header is always attached; when no token is stored the credential is
/// empty, matching the frontend client this replaces.
pub(crate) fn bearer_header(store: &dyn KeyValueStore) -> String {
    let token = store.get(TOKEN_KEY).unwrap_or_default();
    format!("Bearer {token}")
}

/// Extract a refreshed token from a successful response.
///
/// The response `Authorization` header wins; a `token` field in the JSON body
/// is the fallback.
fn refreshed_token(headers: &HeaderMap, body: &[u8]) -> Option<String> {
    if let Some(value) = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) {
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| json.get("token")?.as_str().map(str::to_string))
}

/// Persist a refreshed token carried by the response, if any.
pub(crate) fn capture_refreshed_token(
    store: &dyn KeyValueStore,
    headers: &HeaderMap,
    body: &[u8],
) {
    if let Some(token) = refreshed_token(headers, body) {
        debug!("persisting refreshed auth token");
        store.set(TOKEN_KEY, &token);
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;
    use crate::storage::MemoryStore;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_header_uses_stored_token() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "abc123");
        assert_eq!(bearer_header(&store), "Bearer abc123");
    }

    #[test]
    fn bearer_header_with_no_token_is_empty_credential() {
        let store = MemoryStore::new();
        assert_eq!(bearer_header(&store), "Bearer ");
    }

    #[test]
    fn header_token_wins_over_body_token() {
        let headers = headers_with_auth("from-header");
        let body = br#"{"token":"from-body"}"#;
        assert_eq!(refreshed_token(&headers, body).as_deref(), Some("from-header"));
    }

    #[test]
    fn body_token_is_the_fallback() {
        let headers = HeaderMap::new();
        let body = br#"{"token":"from-body","other":1}"#;
        assert_eq!(refreshed_token(&headers, body).as_deref(), Some("from-body"));
    }

    #[test]
    fn no_token_anywhere_yields_none() {
        let headers = HeaderMap::new();
        assert!(refreshed_token(&headers, br#"{"songs":[]}"#).is_none());
        assert!(refreshed_token(&headers, b"not json").is_none());
        assert!(refreshed_token(&headers, br#"{"token":42}"#).is_none());
    }

    #[test]
    fn capture_overwrites_stored_token() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "stale");

        capture_refreshed_token(&store, &HeaderMap::new(), br#"{"token":"fresh"}"#);
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh"));
    }

    #[test]
    fn capture_without_token_leaves_store_untouched() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "current");

        capture_refreshed_token(&store, &HeaderMap::new(), br#"{"songs":[]}"#);
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("current"));
    }
}
