//! HTTP client bound to one service base address.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use jobboard_core::config::ApiConfig;

use crate::error::{ApiError, ApiResult};
use crate::response::RawResponse;

/// Issues requests against a fixed base address with a fixed deadline.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Pooled HTTP client.
    http: reqwest::Client,
    /// Base address relative paths are joined to, without trailing slash.
    base_url: String,
    /// Deadline covering connect, send, and reading the full body.
    timeout: Duration,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    /// Create a client for `base_url` with an explicit request deadline.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network {
                url: base_url.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// The base address relative paths resolve against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve `path` against the base address.
    pub fn build_url(&self, path: &str) -> String {
        crate::url::build_url(&self.base_url, path)
    }

    /// Send one request and return its status and body text.
    ///
    /// A bearer header is attached only when `token` is non-empty. Any
    /// HTTP status counts as success here; only transport faults and the
    /// deadline produce an error. Never retries.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> ApiResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path);
        let parsed = reqwest::Url::parse(&url).map_err(|e| ApiError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = self.http.request(method.clone(), parsed);
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(bytes);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(RawResponse { status, body })
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(raw)) => {
                debug!(method = %method, url = %url, status = raw.status, "API request completed");
                Ok(raw)
            }
            Ok(Err(e)) => {
                let err = ApiError::from_transport(&url, self.timeout, e);
                warn!(method = %method, url = %url, error = %err, "API request failed");
                Err(err)
            }
            Err(_) => {
                warn!(method = %method, url = %url, timeout = ?self.timeout, "API request timed out");
                Err(ApiError::Timeout {
                    url,
                    after: self.timeout,
                })
            }
        }
    }

    /// Raw GET.
    pub async fn get_raw(&self, path: &str, token: Option<&str>) -> ApiResult<RawResponse> {
        self.request(Method::GET, path, None::<&()>, token).await
    }

    /// Raw POST with a JSON body.
    pub async fn post_raw<B>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ApiResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), token).await
    }

    /// Raw PUT with a JSON body.
    pub async fn put_raw<B>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ApiResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), token).await
    }

    /// Raw DELETE.
    pub async fn delete_raw(&self, path: &str, token: Option<&str>) -> ApiResult<RawResponse> {
        self.request(Method::DELETE, path, None::<&()>, token).await
    }

    /// GET and deserialize a 2xx body; non-2xx is [`ApiError::Status`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ApiResult<T> {
        self.get_raw(path, token).await?.into_json()
    }

    /// POST a JSON body and deserialize a 2xx body; non-2xx is [`ApiError::Status`].
    pub async fn post<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_raw(path, body, token).await?.into_json()
    }

    /// PUT a JSON body and deserialize a 2xx body; non-2xx is [`ApiError::Status`].
    pub async fn put<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put_raw(path, body, token).await?.into_json()
    }

    /// DELETE and deserialize a 2xx body; non-2xx is [`ApiError::Status`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ApiResult<T> {
        self.delete_raw(path, token).await?.into_json()
    }
}
