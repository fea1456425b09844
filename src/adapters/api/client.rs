//! HTTP client for the camp administration API
//!
//! JSON requests are retried after a fixed delay; downloads are not.

use crate::config::{ApiConfig, RetryConfig, SecretString};
use crate::domain::{ApiError, CampdocError, Result};
use crate::log_retry_attempt;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Longest slice of an error body kept in error messages
const MAX_ERROR_BODY: usize = 512;

/// Thin wrapper over `reqwest` bound to one API host
pub struct ApiClient {
    base_url: Url,
    client: Client,
    retry: RetryConfig,
}

impl ApiClient {
    /// Builds a client from the API configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unparsable base URL or if the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CampdocError::Configuration(format!("Invalid api.base_url '{}': {e}", config.base_url))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(concat!("campdoc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                CampdocError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            retry: config.retry.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            CampdocError::Validation(format!("Invalid request path '{path}': {e}"))
        })
    }

    fn build(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        token: Option<&SecretString>,
    ) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret().as_ref());
        }

        // `json` sets Content-Type and Content-Length from the encoded body
        if let Some(body) = body {
            request = request.json(body);
        }

        request
    }

    /// Issues a JSON request, retrying after a fixed delay on any failure
    ///
    /// A failure is a transport error, a non-success status, a body that is
    /// not JSON, or a body that is JSON `null`. The last failure propagates
    /// once the retry budget is spent.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&SecretString>,
    ) -> Result<Value> {
        let max_attempts = self.retry.max_retries + 1;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.request_once(method.clone(), path, body, token).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if attempt >= max_attempts {
                        tracing::error!(
                            method = %method,
                            path = %path,
                            attempts = attempt,
                            error = %e,
                            "Request failed"
                        );
                        return Err(e);
                    }

                    log_retry_attempt!(attempt, max_attempts, e);
                    tokio::time::sleep(Duration::from_millis(self.retry.delay_ms)).await;
                }
            }
        }
    }

    async fn request_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&SecretString>,
    ) -> Result<Value> {
        let url = self.url(path)?;
        tracing::info!(method = %method, path = %path, "API request");

        let response = self
            .build(method, url, body, token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), truncate(&text)).into());
        }

        let text = response.text().await.map_err(map_transport_error)?;
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("{path}: {e}: {}", truncate(&text)))
        })?;

        if value.is_null() {
            return Err(ApiError::EmptyBody(path.to_string()).into());
        }

        Ok(value)
    }

    /// Streams a response body to `destination`
    ///
    /// The body is written to a sibling `.part` file that is renamed into
    /// place once complete. Returns the number of bytes written.
    pub async fn download(
        &self,
        method: Method,
        path: &str,
        destination: &Path,
        token: Option<&SecretString>,
    ) -> Result<u64> {
        let url = self.url(path)?;
        tracing::info!(method = %method, path = %path, "API download");

        let mut response = self
            .build(method, url, None, token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::DownloadFailed(format!(
                "{path}: status {}",
                status.as_u16()
            ))
            .into());
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = part_path(destination);
        let written = match write_body(&mut response, &temp_path).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                    tracing::debug!(path = %temp_path.display(), error = %cleanup, "Could not remove partial download");
                }
                return Err(e);
            }
        };

        tokio::fs::rename(&temp_path, destination).await?;

        tracing::debug!(
            path = %path,
            destination = %destination.display(),
            bytes = written,
            "Download complete"
        );

        Ok(written)
    }
}

async fn write_body(response: &mut reqwest::Response, temp_path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(temp_path).await?;
    let mut written = 0u64;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ApiError::DownloadFailed(e.to_string()))?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    file.sync_all().await?;
    Ok(written)
}

fn part_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

fn map_transport_error(e: reqwest::Error) -> CampdocError {
    if e.is_timeout() {
        ApiError::Timeout(e.to_string()).into()
    } else {
        ApiError::ConnectionFailed(e.to_string()).into()
    }
}

fn truncate(text: &str) -> String {
    if text.len() <= MAX_ERROR_BODY {
        return text.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
