//! Translation client.
//!
//! DeepL-style API: POST /v2/translate with source/target language codes.

use serde::Deserialize;

use crate::error::{ApiError, Result};

#[derive(Debug, Deserialize)]
struct TranslateBody {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// HTTP client for the translation provider.
#[derive(Clone)]
pub struct TranslateClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TranslateClient {
    /// Create a client from environment variables.
    ///
    /// Required env vars:
    /// - DEEPL_API_KEY: API key
    ///
    /// Optional: DEEPL_URL overrides the API base URL.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEEPL_API_KEY")
            .map_err(|_| ApiError::Internal("DEEPL_API_KEY not set".to_string()))?;
        let base_url = std::env::var("DEEPL_URL")
            .unwrap_or_else(|_| "https://api-free.deepl.com".to_string());

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Translate a phrase between the given language codes.
    pub async fn translate(
        &self,
        phrase: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/v2/translate", self.base_url))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&serde_json::json!({
                "text": [phrase],
                "source_lang": source_language,
                "target_lang": target_language,
            }))
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("translation: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!("translation: {status} {detail}")));
        }

        let body = response
            .json::<TranslateBody>()
            .await
            .map_err(|e| ApiError::Upstream(format!("translation: {e}")))?;

        body.translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| ApiError::Upstream("translation: empty response".to_string()))
    }
}
