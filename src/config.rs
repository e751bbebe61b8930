//! Client configuration and API base-URL resolution.

use std::time::Duration;

use reqwest::header::HeaderMap;
use url::Url;

use crate::api::ApiError;
use crate::storage::{KeyValueStore, HOST_KEY};

/// Path suffix appended to the host to reach the API root.
const API_SUFFIX: &str = "api";

/// Where the API base URL comes from.
///
/// Hosted-app builds let the user point the client at their own server; the
/// host is read from persistent storage under [`HOST_KEY`]. Web builds inject
/// the base URL at build time instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrlSource {
    /// Resolve from the stored host value.
    StoredHost,
    /// Use the injected application base URL.
    Configured(String),
}

impl BaseUrlSource {
    /// Resolve the absolute API base URL.
    ///
    /// The stored or configured host is expected to end with a slash; the
    /// fixed `api` suffix is appended verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the host is missing from storage or
    /// the resolved value is not an absolute URL.
    pub fn resolve(&self, store: &dyn KeyValueStore) -> Result<Url, ApiError> {
        let raw = match self {
            Self::StoredHost => {
                let host = store
                    .get(HOST_KEY)
                    .filter(|host| !host.is_empty())
                    .ok_or_else(|| {
                        ApiError::Config(format!("storage key {HOST_KEY:?} holds no server host"))
                    })?;
                format!("{host}{API_SUFFIX}")
            }
            Self::Configured(base) => format!("{base}{API_SUFFIX}"),
        };

        Url::parse(&raw)
            .map_err(|err| ApiError::Config(format!("invalid API base URL {raw:?}: {err}")))
    }
}

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base-URL resolution mode.
    pub base_url: BaseUrlSource,
    /// Transport-level timeout applied to every request.
    pub timeout: Duration,
    /// How long a request may run before the loading indicator shows.
    pub progress_delay: Duration,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Extra headers attached to every request (e.g. a client-version tag).
    pub default_headers: Option<HeaderMap>,
}

impl ApiClientConfig {
    pub fn new(base_url: BaseUrlSource) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            progress_delay: Duration::from_millis(2000),
            user_agent: None,
            default_headers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn configured_base_appends_api_suffix() {
        let store = MemoryStore::new();
        let source = BaseUrlSource::Configured("https://demo.example.com/".to_string());

        let url = source.resolve(&store).unwrap();
        assert_eq!(url.as_str(), "https://demo.example.com/api");
    }

    #[test]
    fn stored_host_is_read_from_storage() {
        let store = MemoryStore::new();
        store.set(HOST_KEY, "http://192.168.1.10:8000/");

        let url = BaseUrlSource::StoredHost.resolve(&store).unwrap();
        assert_eq!(url.as_str(), "http://192.168.1.10:8000/api");
    }

    #[test]
    fn missing_stored_host_is_a_config_error() {
        let store = MemoryStore::new();

        let err = BaseUrlSource::StoredHost.resolve(&store).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn empty_stored_host_is_a_config_error() {
        let store = MemoryStore::new();
        store.set(HOST_KEY, "");

        let err = BaseUrlSource::StoredHost.resolve(&store).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn relative_base_is_a_config_error() {
        let store = MemoryStore::new();
        let source = BaseUrlSource::Configured("/".to_string());

        let err = source.resolve(&store).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn defaults_match_the_shipped_frontend() {
        let config = ApiClientConfig::new(BaseUrlSource::StoredHost);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.progress_delay, Duration::from_millis(2000));
        assert!(config.user_agent.is_none());
        assert!(config.default_headers.is_none());
    }
}
