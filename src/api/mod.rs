/// Backend access for FinSight
///
/// All intelligence (answering, chart generation, document parsing, credential
/// loading) lives in an external HTTP service. This module defines the
/// [`FinanceBackend`] seam the orchestrators talk to and the reqwest-backed
/// [`HttpBackend`] used by the app.
///
/// # Usage
///
/// ```rust,no_run
/// use finsight::api::{FinanceBackend, HttpBackend};
/// use finsight::config::BackendConfig;
///
/// # async fn example() -> Result<(), finsight::api::BackendError> {
/// let backend = HttpBackend::new(BackendConfig::from_env());
/// let answer = backend.query("Revenue trend of Reliance Industries 2025").await?;
/// println!("{:?}", answer.answer_text());
/// # Ok(())
/// # }
/// ```
mod client;
mod wire;

pub use client::HttpBackend;
pub use wire::{ApiKeyResponse, QueryResponse, VisualizeResponse};

use async_trait::async_trait;
use std::sync::Arc;

pub const QUERY_PATH: &str = "/query_router";
pub const VISUALIZE_PATH: &str = "/visualize_router";
pub const PARSE_PATH: &str = "/parse_router";
pub const LOAD_API_KEY_PATH: &str = "/load_api_key";

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    #[error("unexpected backend payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    /// Backend-supplied `detail` message, when the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// The four backend operations the UI depends on.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait FinanceBackend: Send + Sync {
    /// `POST /query_router` with `{query}`.
    async fn query(&self, query: &str) -> BackendResult<QueryResponse>;

    /// `POST /visualize_router` with `{query}`.
    async fn visualize(&self, query: &str) -> BackendResult<VisualizeResponse>;

    /// `POST /parse_router` with the file as multipart field `file`.
    async fn parse_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> BackendResult<serde_json::Value>;

    /// `POST /load_api_key` with `{api_key}`.
    async fn load_api_key(&self, api_key: &str) -> BackendResult<ApiKeyResponse>;
}

/// Shared handle handed to views through context.
#[derive(Clone)]
pub struct BackendHandle(pub Arc<dyn FinanceBackend>);

impl BackendHandle {
    pub fn new(backend: impl FinanceBackend + 'static) -> Self {
        Self(Arc::new(backend))
    }
}

impl std::ops::Deref for BackendHandle {
    type Target = dyn FinanceBackend;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for BackendHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
