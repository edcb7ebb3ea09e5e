//! Upstream module - HTTP client for the Generative Language API

mod request_executor;

#[cfg(test)]
mod tests;

pub use quizpilot_types::CredentialCheck;
pub use request_executor::{build_method_url, build_model_url, redact_url};

use reqwest::Client;
use std::time::Duration;

use quizpilot_types::protocol::GenerateContentRequest;
use quizpilot_types::{AskError, GeminiConfig};

use super::retry::extract_error_message;
use crate::error::AppResult;

/// Environment variable overriding the configured API root.
pub const BASE_URL_ENV: &str = "QUIZPILOT_GEMINI_BASE_URL";

fn resolve_base_url(configured: &str) -> String {
    if let Ok(raw) = std::env::var(BASE_URL_ENV) {
        let candidate = raw.trim().trim_end_matches('/').to_string();
        if candidate.is_empty() {
            tracing::warn!("{} is empty, using configured base URL", BASE_URL_ENV);
        } else if url::Url::parse(&candidate).is_err() {
            tracing::warn!("{} is not a valid URL, using configured base URL", BASE_URL_ENV);
        } else {
            tracing::info!("Using custom Gemini base URL");
            return candidate;
        }
    }
    configured.trim_end_matches('/').to_string()
}

/// Raw provider reply, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
    /// `Retry-After` header, in seconds
    pub retry_after_secs: Option<u64>,
}

pub struct GeminiClient {
    http_client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from config, honouring the base URL override.
    pub fn new(config: &GeminiConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(http_client, &resolve_base_url(&config.base_url)))
    }

    /// Use a pre-built `reqwest::Client` against an explicit API root.
    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self { http_client, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST models/{model}:generateContent`.
    ///
    /// Any HTTP status is returned as a reply; only transport failures are
    /// errors, reported as `AskError::Network`.
    pub async fn generate_content(
        &self,
        model: &str,
        credential: &str,
        body: &GenerateContentRequest,
    ) -> Result<UpstreamReply, AskError> {
        let url = build_method_url(&self.base_url, model, "generateContent", credential)
            .map_err(|message| AskError::Network { message })?;
        tracing::debug!("Gemini request -> {}", redact_url(&url));

        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AskError::Network { message: format!("fetch failed: {}", e) })?;

        let status = response.status().as_u16();
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok());
        let body = response
            .text()
            .await
            .map_err(|e| AskError::Network { message: format!("fetch body failed: {}", e) })?;

        tracing::debug!("Gemini response <- status={} bytes={}", status, body.len());
        Ok(UpstreamReply { status, body, retry_after_secs })
    }

    /// Probe a credential with `GET models/{model}`.
    pub async fn validate_credential(&self, model: &str, credential: &str) -> CredentialCheck {
        if credential.trim().is_empty() {
            return CredentialCheck::invalid("API key is required");
        }

        let url = match build_model_url(&self.base_url, model, credential.trim()) {
            Ok(url) => url,
            Err(message) => return CredentialCheck::invalid(message),
        };

        let response = match self.http_client.get(url).send().await {
            Ok(r) => r,
            Err(e) => return CredentialCheck::invalid(format!("Network error: {}", e)),
        };

        match response.status().as_u16() {
            200..=299 => CredentialCheck::valid(),
            400 => {
                let body = response.text().await.unwrap_or_default();
                CredentialCheck::invalid(
                    extract_error_message(&body).unwrap_or_else(|| "Invalid API key".to_string()),
                )
            },
            403 => CredentialCheck::invalid("API key is invalid or doesn't have permission"),
            status => CredentialCheck::invalid(format!("Validation failed with status {}", status)),
        }
    }
}
