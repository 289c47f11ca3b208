use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::database::repositories::SkuRepositoryError;

/// JSON client bound to the backend's base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn from_url(base_url: &str, timeout: Duration) -> Result<Self, SkuRepositoryError> {
        tracing::info!("Configuring API client for {}", base_url);
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SkuRepositoryError::InvalidEndpoint(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(ApiClient { client, base_url })
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, SkuRepositoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SkuRepositoryError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a non-2xx response into `BackendError` with the body as message.
    pub async fn check_status(response: Response) -> Result<Response, SkuRepositoryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::warn!("Backend responded with {}: {}", status, message);
        Err(SkuRepositoryError::BackendError {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, SkuRepositoryError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Cheap reachability probe against a read-only endpoint.
    pub async fn health_check(&self) -> Result<bool, SkuRepositoryError> {
        let url = self.endpoint(&["bundle-types"])?;
        let response = self.client.get(url).send().await?;
        let healthy = response.status().is_success();
        if healthy {
            tracing::info!("API health check passed");
        } else {
            tracing::warn!("API health check failed with status {}", response.status());
        }
        Ok(healthy)
    }
}
