use std::time::Duration;

use engine::{Assistant, AssistantError, ImagePayload, RecordPatch, RecordSummary};
use reqwest::{Client, StatusCode};

use crate::{
    config::GeminiConfig,
    prompt,
    wire::{ErrorBody, GenerateRequest, GenerateResponse, patch_from_text},
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum GeminiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
}

impl From<GeminiError> for AssistantError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Network(err) if err.is_decode() => AssistantError::Malformed(err.to_string()),
            GeminiError::Server { status, message }
                if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) =>
            {
                AssistantError::NotConfigured(message)
            }
            err => AssistantError::Unavailable(err.to_string()),
        }
    }
}

/// Gemini `generateContent` client.
///
/// One request per call, no retries. Cloning shares the connection pool.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    advice_language: String,
}

impl GeminiClient {
    /// Builds a client, failing with [`AssistantError::NotConfigured`] when
    /// no API key can be found.
    pub fn new(config: &GeminiConfig) -> Result<Self, AssistantError> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            AssistantError::NotConfigured("missing API key (set assistant.api_key)".to_string())
        })?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| AssistantError::NotConfigured(err.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            api_key,
            advice_language: config.advice_language.clone(),
        })
    }

    async fn generate(&self, body: &GenerateRequest) -> Result<String, AssistantError> {
        let response = self.post(body).await.map_err(|err| {
            tracing::error!("gemini request failed: {err}");
            AssistantError::from(err)
        })?;
        response.text()
    }

    async fn post(&self, body: &GenerateRequest) -> Result<GenerateResponse, GeminiError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<GenerateResponse>().await?);
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(body) if !body.error.message.is_empty() => body.error.message,
            Ok(body) => body.error.status,
            Err(_) => "server error".to_string(),
        };
        Err(GeminiError::Server { status, message })
    }
}

impl Assistant for GeminiClient {
    async fn parse_text(&self, text: &str) -> Result<RecordPatch, AssistantError> {
        tracing::info!(chars = text.chars().count(), "parsing text");
        let body = GenerateRequest::structured(prompt::parse_text(text), prompt::record_schema());
        patch_from_text(&self.generate(&body).await?)
    }

    async fn parse_image(
        &self,
        image: &ImagePayload,
        context: &str,
    ) -> Result<RecordPatch, AssistantError> {
        tracing::info!(
            bytes = image.data.len(),
            media_type = %image.media_type,
            "parsing image"
        );
        let body =
            GenerateRequest::image(image, prompt::parse_image(context), prompt::record_schema());
        patch_from_text(&self.generate(&body).await?)
    }

    async fn summarize(&self, records: &[RecordSummary]) -> Result<String, AssistantError> {
        tracing::info!(records = records.len(), "requesting advice");
        let items = serde_json::to_string(records)
            .map_err(|err| AssistantError::Malformed(err.to_string()))?;
        let body = GenerateRequest::text(prompt::advice(&self.advice_language, &items));
        self.generate(&body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_not_configured() {
        let config = GeminiConfig {
            api_key: Some(" ".to_string()),
            ..GeminiConfig::default()
        };
        // Only meaningful when the fallback variables are unset.
        if crate::config::API_KEY_FALLBACKS
            .iter()
            .all(|name| std::env::var(name).map_or(true, |v| v.trim().is_empty()))
        {
            assert!(matches!(
                GeminiClient::new(&config),
                Err(AssistantError::NotConfigured(_))
            ));
        }
    }

    #[test]
    fn configured_client_targets_model_endpoint() {
        let config = GeminiConfig {
            api_key: Some("secret".to_string()),
            model: "gemini-test".to_string(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent"
        );
        assert_eq!(client.api_key, "secret");
    }

    #[test]
    fn auth_failures_read_as_not_configured() {
        let err = AssistantError::from(GeminiError::Server {
            status: StatusCode::FORBIDDEN,
            message: "API key not valid".to_string(),
        });
        assert_eq!(err, AssistantError::NotConfigured("API key not valid".to_string()));

        let err = AssistantError::from(GeminiError::Server {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "overloaded".to_string(),
        });
        assert!(matches!(err, AssistantError::Unavailable(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_unavailable() {
        let config = GeminiConfig {
            api_key: Some("secret".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        let err = client.parse_text("tea 30").await.unwrap_err();
        assert!(matches!(err, AssistantError::Unavailable(_)));
    }
}
