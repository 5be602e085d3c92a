// src/api/mod.rs

//! REST client for the storefront backend
//!
//! Every call takes a [`CancellationToken`]. When the token fires before the
//! response arrives the call resolves to a cancellation error and the
//! response is dropped, so a closed page never applies a late result.

pub mod products;
pub mod resources;
pub mod upload;

use std::future::Future;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;
use crate::error::{Error, Result};

pub use products::ProductApi;
pub use upload::{CloudinaryUploader, ImageFile, ImageUploader};

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponseData {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

/// Runs `future` unless `cancel` fires first
pub async fn cancellable<T, F>(operation: &str, cancel: &CancellationToken, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(Error::cancelled(operation));
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(operation, "request cancelled");
            Err(Error::cancelled(operation))
        }
        result = future => result,
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    with_credentials: bool,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let builder = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .cookie_store(config.with_credentials);

        #[cfg(target_arch = "wasm32")]
        let builder = Client::builder();

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            with_credentials: config.with_credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn with_credentials(&self) -> bool {
        self.with_credentials
    }

    /// Absolute URL for a backend path, with or without a leading slash
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        #[cfg(target_arch = "wasm32")]
        let builder = if self.with_credentials {
            builder.fetch_credentials_include()
        } else {
            builder
        };
        builder
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, cancel: &CancellationToken) -> Result<T> {
        self.send(path, self.request(Method::GET, path), cancel).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q, cancel: &CancellationToken) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::GET, path).query(query), cancel)
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, cancel: &CancellationToken) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::POST, path).json(body), cancel)
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B, cancel: &CancellationToken) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::PUT, path).json(body), cancel)
            .await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B, cancel: &CancellationToken) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::PATCH, path).json(body), cancel)
            .await
    }

    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str, cancel: &CancellationToken) -> Result<T> {
        self.send(path, self.request(Method::PATCH, path), cancel).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, cancel: &CancellationToken) -> Result<T> {
        self.send(path, self.request(Method::DELETE, path), cancel).await
    }

    /// DELETE carrying a JSON body, used by the bulk-delete endpoints
    pub async fn delete_with_body<T, B>(&self, path: &str, body: &B, cancel: &CancellationToken) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::DELETE, path).json(body), cancel)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<T> {
        cancellable(path, cancel, async {
            tracing::debug!(endpoint = path, "api request");
            let response = request.send().await?;
            Self::handle_response(path, response).await
        })
        .await
    }

    async fn handle_response<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body: ErrorResponseData = serde_json::from_str(&text).unwrap_or_default();
            let message = match body.message {
                Some(serde_json::Value::String(m)) => m,
                Some(other) => other.to_string(),
                None => status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            };
            tracing::warn!(
                endpoint = path,
                status = status.as_u16(),
                error_code = body.error_code.as_deref().unwrap_or("-"),
                "api request failed"
            );
            if status == StatusCode::UNAUTHORIZED && body.error_code.is_none() {
                return Err(Error::authentication(message).source(path.to_string()));
            }
            return Err(Error::network(path, Some(status.as_u16()), body.error_code, message));
        }

        parse_body(&text).map_err(|e| e.source(path.to_string()))
    }
}

/// Parses a response body; an empty body reads as JSON `null`
pub(crate) fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let body = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(body).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: "http://localhost:3000/api/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let api = client();
        assert_eq!(api.base_url(), "http://localhost:3000/api");
        assert_eq!(api.url("/product"), "http://localhost:3000/api/product");
        assert_eq!(api.url("users/update-profile"), "http://localhost:3000/api/users/update-profile");
    }

    #[test]
    fn test_empty_body_parses_as_unit() {
        let unit: () = parse_body("").unwrap();
        assert_eq!(unit, ());
        let value: Option<u32> = parse_body("  ").unwrap();
        assert_eq!(value, None);
        assert!(parse_body::<u32>("{").is_err());
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let result: Result<u32> = cancellable("/product", &token, async { Ok(1) }).await;
        let err = result.unwrap_err();
        assert!(err.is_cancelled());
        assert!(matches!(err.kind, ErrorKind::Cancelled { .. }));
    }

    #[tokio::test]
    async fn test_cancel_while_pending() {
        let token = CancellationToken::new();
        let child = token.child_token();
        let pending = cancellable("/order/all/", &child, async {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            Ok::<_, Error>(())
        });
        token.cancel();
        assert!(pending.await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_uncancelled_future_completes() {
        let token = CancellationToken::new();
        let value = tokio_test::assert_ok!(cancellable("/product", &token, async { Ok(7) }).await);
        assert_eq!(value, 7);
    }
}
