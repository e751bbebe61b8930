//! # Encore API client
//!
//! Centralized HTTP client for the Encore frontend. Every request to the
//! server goes through one [`ApiClient`], which:
//!
//! - injects the stored auth token as a bearer credential on every request,
//! - captures a refreshed token from responses (header first, JSON `token`
//!   field as fallback) and persists it,
//! - shows the loading indicator only after a request has been in flight for
//!   a while, and always dismisses it on completion,
//! - broadcasts [`AppEvent::LogOut`] when a request fails with 400/401 and
//!   the failing call was not itself a login attempt,
//! - propagates every error to the caller unchanged in kind.
//!
//! Collaborators are injected as traits so the client stays independently
//! testable: [`KeyValueStore`] for the token and host, [`EventBus`] for the
//! logout broadcast, and [`ProgressIndicator`] for the loading affordance.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use encore_client::{ApiClient, ApiClientConfig, BaseUrlSource, MemoryStore, NoopIndicator};
//! # use encore_client::{AppEvent, EventBus};
//! # struct Bus;
//! # impl EventBus for Bus { fn emit(&self, _event: AppEvent) {} }
//!
//! # async fn run() -> Result<(), encore_client::ApiError> {
//! let config = ApiClientConfig::new(BaseUrlSource::Configured(
//!     "https://demo.example.com/".to_string(),
//! ));
//! let client = ApiClient::new(
//!     config,
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(Bus),
//!     Arc::new(NoopIndicator),
//! )?;
//!
//! let songs: Vec<serde_json::Value> = client.get("/songs").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod events;
pub mod http;
pub mod progress;
pub mod storage;
pub mod upload;

pub use api::{ApiClient, ApiError, ApiErrorCategory, ApiResponse};
pub use config::{ApiClientConfig, BaseUrlSource};
pub use events::{AppEvent, EventBus};
pub use progress::{NoopIndicator, ProgressIndicator};
pub use storage::{KeyValueStore, MemoryStore, HOST_KEY, TOKEN_KEY};
pub use upload::UploadProgress;
