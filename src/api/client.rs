use super::wire::{ApiKeyRequest, ErrorBody, QueryRequest, lenient};
use super::{
    ApiKeyResponse, BackendError, BackendResult, FinanceBackend, LOAD_API_KEY_PATH, PARSE_PATH,
    QUERY_PATH, QueryResponse, VISUALIZE_PATH, VisualizeResponse,
};
use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, multipart};
use serde::de::DeserializeOwned;

/// reqwest client for the FinSight backend
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "backend request");
        let request = self.client.post(url);
        self.with_timeout(request)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn with_timeout(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.request_timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    // The browser fetch API owns timeouts on the web target.
    #[cfg(target_arch = "wasm32")]
    fn with_timeout(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }

    /// Send the request and return the body of a 2xx response.
    async fn send(&self, path: &str, request: RequestBuilder) -> BackendResult<String> {
        let response = request.send().await.inspect_err(|err| {
            tracing::warn!(path, error = %err, "backend transport failure");
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "backend returned error status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                detail: ErrorBody::detail_text(&body),
            });
        }

        Ok(body)
    }

    async fn send_lenient<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> BackendResult<T> {
        let body = self.send(path, request).await?;
        Ok(lenient(&body))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl FinanceBackend for HttpBackend {
    async fn query(&self, query: &str) -> BackendResult<QueryResponse> {
        let request = self.post(QUERY_PATH).json(&QueryRequest { query });
        self.send_lenient(QUERY_PATH, request).await
    }

    async fn visualize(&self, query: &str) -> BackendResult<VisualizeResponse> {
        let request = self.post(VISUALIZE_PATH).json(&QueryRequest { query });
        self.send_lenient(VISUALIZE_PATH, request).await
    }

    async fn parse_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> BackendResult<serde_json::Value> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let request = self.post(PARSE_PATH).multipart(form);
        // No schema, but the result is stored as JSON.
        let body = self.send(PARSE_PATH, request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn load_api_key(&self, api_key: &str) -> BackendResult<ApiKeyResponse> {
        let request = self.post(LOAD_API_KEY_PATH).json(&ApiKeyRequest { api_key });
        self.send_lenient(LOAD_API_KEY_PATH, request).await
    }
}
