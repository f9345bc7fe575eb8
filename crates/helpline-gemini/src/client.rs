// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Google Generative Language API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication, streaming SSE responses, and transient error retry.

use std::time::Duration;

use helpline_core::HelplineError;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::sse::{self, ResponseStream};
use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Public endpoint of the Generative Language API.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for Gemini API communication.
///
/// Retries once on 429, 500 and 503.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl GeminiClient {
    /// Creates a client authenticated with `api_key`.
    pub fn new(
        api_key: &SecretString,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HelplineError> {
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| HelplineError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| HelplineError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Overrides the delay between retries.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Streams `request` from `model` as decoded SSE fragments.
    pub async fn stream_generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<ResponseStream, HelplineError> {
        let url = format!("{}?alt=sse", self.endpoint(model, "streamGenerateContent"));
        let response = self.send_with_retry(&url, request).await?;
        Ok(sse::parse_sse_stream(response))
    }

    /// Sends `request` to `model` and waits for the full response.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, HelplineError> {
        let url = self.endpoint(model, "generateContent");
        let response = self.send_with_retry(&url, request).await?;
        let body = response.text().await.map_err(|e| HelplineError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| HelplineError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Lists models; used as a cheap credential check.
    pub async fn list_models(&self) -> Result<(), HelplineError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .send()
            .await
            .map_err(|e| HelplineError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(api_error(status, &body))
        }
    }

    async fn send_with_retry(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> Result<reqwest::Response, HelplineError> {
        let mut attempt = 0;
        loop {
            let response = self
                .client
                .post(url)
                .json(request)
                .send()
                .await
                .map_err(|e| HelplineError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "Gemini response received");

            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                attempt += 1;
                tokio::time::sleep(self.retry_delay).await;
                continue;
            }
            return Err(api_error(status, &body));
        }
    }
}

fn api_error(status: reqwest::StatusCode, body: &str) -> HelplineError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "Gemini API error ({}): {}",
            api_err.error.status, api_err.error.message
        ),
        Err(_) => format!("API returned {status}: {body}"),
    };
    HelplineError::Provider {
        message,
        source: None,
    }
}

/// Status codes worth one retry.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
