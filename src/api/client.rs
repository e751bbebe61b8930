//! The API client facade.
//!
//! One instance is constructed at application startup and shared by every
//! feature module that talks to the server. All cross-cutting behavior lives
//! here as explicit pre/post steps around the transport call: bearer-token
//! injection, refreshed-token capture, the delayed loading indicator, and the
//! logout broadcast on authentication failure.

use std::sync::Arc;

use regex::Regex;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::config::ApiClientConfig;
use crate::events::{AppEvent, EventBus};
use crate::http::HttpClient;
use crate::progress::{DelayedProgress, ProgressIndicator};
use crate::storage::KeyValueStore;
use crate::upload::{progress_body, UploadProgress};

use super::auth;
use super::errors::ApiError;

/// Response envelope: decoded payload plus transport metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

/// Centralized API client.
///
/// Owns the configured transport and the resolved base URL. Collaborators
/// are injected: the persistent key-value store the token lives in, the
/// application event bus, and the loading-indicator widget.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
    bus: Arc<dyn EventBus>,
    progress: DelayedProgress,
    login_path: Regex,
}

impl ApiClient {
    /// Construct the client, resolving the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the host is missing from storage,
    /// the resolved base URL is invalid, or the transport cannot be built.
    pub fn new(
        config: ApiClientConfig,
        store: Arc<dyn KeyValueStore>,
        bus: Arc<dyn EventBus>,
        indicator: Arc<dyn ProgressIndicator>,
    ) -> Result<Self, ApiError> {
        let base_url = config.base_url.resolve(store.as_ref())?;

        let mut http = HttpClient::builder().timeout(config.timeout);
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }
        if let Some(headers) = &config.default_headers {
            http = http.default_headers(headers.clone());
        }
        let http = http.build()?;

        // Login attempts are exempt from the logout broadcast. Anchored at
        // the end so only the login endpoint itself matches, with or without
        // a trailing slash.
        let login_path =
            Regex::new(r"/api/me/?$").map_err(|err| ApiError::Config(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            store,
            bus,
            progress: DelayedProgress::new(indicator, config.progress_delay),
            login_path,
        })
    }

    /// Issue one request and return the full response envelope.
    ///
    /// `body` defaults to an empty JSON object, matching the frontend client
    /// this replaces. `progress` reports upload progress for large bodies.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        progress: Option<UploadProgress>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let payload = body.unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        self.execute(method, url, payload, progress).await
    }

    /// Fetch `path` and return the decoded payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Ok(self.request(Method::GET, path, None, None).await?.data)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = to_value(body)?;
        Ok(self.request(Method::POST, path, Some(body), None).await?.data)
    }

    /// `post` with an upload-progress callback, for large request bodies.
    pub async fn post_with_progress<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        progress: UploadProgress,
    ) -> Result<T, ApiError> {
        let body = to_value(body)?;
        Ok(self.request(Method::POST, path, Some(body), Some(progress)).await?.data)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = to_value(body)?;
        Ok(self.request(Method::PUT, path, Some(body), None).await?.data)
    }

    /// Delete `path` with the default empty body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Ok(self.request(Method::DELETE, path, None, None).await?.data)
    }

    pub async fn delete_with_body<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = to_value(body)?;
        Ok(self.request(Method::DELETE, path, Some(body), None).await?.data)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        payload: Value,
        progress: Option<UploadProgress>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let mut builder = self
            .http
            .request(method.clone(), url.as_str())
            .header(AUTHORIZATION, auth::bearer_header(self.store.as_ref()));

        builder = match progress {
            Some(callback) => {
                let bytes = serde_json::to_vec(&payload)
                    .map_err(|err| ApiError::Encode(err.to_string()))?;
                builder
                    .header(CONTENT_TYPE, "application/json")
                    .body(progress_body(bytes, callback))
            }
            None => builder.json(&payload),
        };

        self.progress.schedule().await;

        match self.http.send(builder).await {
            Ok(response) => self.complete(method, url, response).await,
            Err(err) => {
                // Transport failure: no response, so no logout check. The
                // indicator is still dismissed.
                self.progress.finish().await;
                Err(err)
            }
        }
    }

    async fn complete<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.progress.finish().await;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes =
            response.bytes().await.map_err(|err| ApiError::Network(err.to_string()))?;

        if !status.is_success() {
            if self.should_log_out(&method, &url, status) {
                warn!(%method, %url, %status, "authentication failure, broadcasting logout");
                self.bus.emit(AppEvent::LogOut);
            }
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ApiError::Status { method, url, status, body });
        }

        auth::capture_refreshed_token(self.store.as_ref(), &headers, &bytes);

        let data = if bytes.is_empty() || status == StatusCode::NO_CONTENT {
            serde_json::from_value(Value::Null)
                .map_err(|err| ApiError::Decode(format!("{method} {url}: {err}")))?
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|err| ApiError::Decode(format!("{method} {url}: {err}")))?
        };

        Ok(ApiResponse { data, status, headers })
    }

    /// 400/401 means the session expired, unless the failing call was the
    /// login attempt itself.
    fn should_log_out(&self, method: &Method, url: &str, status: StatusCode) -> bool {
        let auth_failure =
            status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED;
        let login_attempt = *method == Method::POST && self.login_path.is_match(url);

        auth_failure && !login_attempt
    }
}

fn to_value<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|err| ApiError::Encode(err.to_string()))
}
