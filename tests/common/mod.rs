//! In-process backend with scripted responses.

#![allow(dead_code)]

use async_trait::async_trait;
use finsight::api::{
    ApiKeyResponse, BackendError, BackendResult, FinanceBackend, QueryResponse, VisualizeResponse,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Barrier;

pub fn unavailable() -> BackendError {
    BackendError::Status {
        status: 503,
        detail: None,
    }
}

/// A scripted upload: how long the backend "works" on it and what it answers.
#[derive(Clone)]
pub struct UploadScript {
    pub delay: Duration,
    pub response: Option<Value>,
}

#[derive(Default)]
pub struct ScriptedBackend {
    /// `None` makes `/query_router` fail.
    pub answer: Option<Value>,
    /// `None` makes `/visualize_router` fail.
    pub chart: Option<Value>,
    pub uploads: HashMap<String, UploadScript>,
    pub api_key: Option<Result<Value, (u16, Option<String>)>>,
    /// When set, query and visualize both wait here before answering.
    pub rendezvous: Option<Arc<Barrier>>,
    pub query_calls: AtomicUsize,
    pub visualize_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn answering(answer: Value, chart: Value) -> Self {
        Self {
            answer: Some(answer),
            chart: Some(chart),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_upload(mut self, name: &str, delay_ms: u64, response: Option<Value>) -> Self {
        self.uploads.insert(
            name.to_string(),
            UploadScript {
                delay: Duration::from_millis(delay_ms),
                response,
            },
        );
        self
    }

    async fn meet(&self) {
        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }
    }
}

#[async_trait]
impl FinanceBackend for ScriptedBackend {
    async fn query(&self, _query: &str) -> BackendResult<QueryResponse> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.meet().await;
        match &self.answer {
            Some(body) => Ok(serde_json::from_value(body.clone())?),
            None => Err(unavailable()),
        }
    }

    async fn visualize(&self, _query: &str) -> BackendResult<VisualizeResponse> {
        self.visualize_calls.fetch_add(1, Ordering::SeqCst);
        self.meet().await;
        match &self.chart {
            Some(body) => Ok(serde_json::from_value(body.clone())?),
            None => Err(unavailable()),
        }
    }

    async fn parse_document(&self, file_name: &str, _bytes: Vec<u8>) -> BackendResult<Value> {
        let Some(script) = self.uploads.get(file_name).cloned() else {
            return Err(unavailable());
        };
        tokio::time::sleep(script.delay).await;
        script.response.ok_or_else(unavailable)
    }

    async fn load_api_key(&self, _api_key: &str) -> BackendResult<ApiKeyResponse> {
        match &self.api_key {
            Some(Ok(body)) => Ok(serde_json::from_value(body.clone())?),
            Some(Err((status, detail))) => Err(BackendError::Status {
                status: *status,
                detail: detail.clone(),
            }),
            None => Err(unavailable()),
        }
    }
}
