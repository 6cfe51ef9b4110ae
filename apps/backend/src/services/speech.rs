//! Text-to-speech client.
//!
//! Thin wrapper over an ElevenLabs-style HTTP API; the voice and model are
//! fixed per deployment via environment.

use crate::error::{ApiError, Result};

const DEFAULT_MODEL: &str = "eleven_multilingual_v2";

/// HTTP client for the text-to-speech provider.
#[derive(Clone)]
pub struct SpeechClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    voice_id: String,
}

impl SpeechClient {
    /// Create a client from environment variables.
    ///
    /// Required env vars:
    /// - ELEVENLABS_API_KEY: API key
    /// - ELEVENLABS_VOICE_ID: Voice used for all phrases
    ///
    /// Optional: ELEVENLABS_URL overrides the API base URL.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ELEVENLABS_API_KEY")
            .map_err(|_| ApiError::Internal("ELEVENLABS_API_KEY not set".to_string()))?;
        let voice_id = std::env::var("ELEVENLABS_VOICE_ID")
            .map_err(|_| ApiError::Internal("ELEVENLABS_VOICE_ID not set".to_string()))?;
        let base_url = std::env::var("ELEVENLABS_URL")
            .unwrap_or_else(|_| "https://api.elevenlabs.io".to_string());

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            voice_id,
        })
    }

    /// Synthesize `text` as MP3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.base_url, self.voice_id
            ))
            .header("xi-api-key", &self.api_key)
            .json(&serde_json::json!({
                "text": text,
                "model_id": DEFAULT_MODEL,
            }))
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("text-to-speech: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "text-to-speech: {status} {detail}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Upstream(format!("text-to-speech: {e}")))?;

        Ok(bytes.to_vec())
    }
}
