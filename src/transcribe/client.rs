//! HTTP client for the Azure OpenAI Whisper deployment.

use super::TranscribeError;
use crate::config::Config;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Whisper endpoint response body.
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: Option<String>,
}

/// Client for one Whisper deployment, configured once and reused per file.
pub struct WhisperClient {
    client: Client,
    config: Config,
}

impl WhisperClient {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Transcribe a single audio file.
    ///
    /// Returns `Ok(None)` when the endpoint answers 200 with no text, which
    /// the caller logs but does not treat as a failure.
    pub async fn transcribe(&self, path: &Path) -> Result<Option<String>, TranscribeError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        debug!("Uploading {} ({} bytes)", file_name, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;
        let form = Form::new().part("file", part);

        let temperature = self.config.temperature.to_string();
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("api-key", &self.config.api_key)
            .query(&[
                ("api-version", self.config.api_version.as_str()),
                ("language", self.config.language.as_str()),
                ("prompt", self.config.prompt.as_str()),
                ("temperature", temperature.as_str()),
            ])
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::Http { status, body });
        }

        let body: TranscriptionResponse = response.json().await?;
        Ok(body.text.filter(|text| !text.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_text() {
        let body: TranscriptionResponse =
            serde_json::from_str(r#"{"text": "hola"}"#).unwrap();
        assert_eq!(body.text.as_deref(), Some("hola"));
    }

    #[test]
    fn test_response_without_text_field() {
        let body: TranscriptionResponse = serde_json::from_str("{}").unwrap();
        assert!(body.text.is_none());
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let body: TranscriptionResponse =
            serde_json::from_str(r#"{"text": "hola", "duration": 12.5}"#).unwrap();
        assert_eq!(body.text.as_deref(), Some("hola"));
    }
}
