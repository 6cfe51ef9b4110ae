//! Client for the external identity provider.
//!
//! The backend never manages credentials itself; tokens are minted and
//! validated by a GoTrue-style auth service. This client resolves bearer
//! tokens to user identities and proxies the password and refresh grants
//! for the login endpoints.

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::TokenResponse;

/// A user identity resolved from a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(alias = "msg", alias = "error_description", alias = "message")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    refresh_token: String,
}

/// HTTP client for the identity provider.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a client from environment variables.
    ///
    /// Required env vars:
    /// - IDENTITY_URL: Base URL of the auth service
    /// - IDENTITY_API_KEY: Service API key sent alongside user tokens
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("IDENTITY_URL")
            .map_err(|_| ApiError::Internal("IDENTITY_URL not set".to_string()))?;
        let api_key = std::env::var("IDENTITY_API_KEY")
            .map_err(|_| ApiError::Internal("IDENTITY_API_KEY not set".to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Resolve a bearer token to the user it belongs to.
    ///
    /// An expired token is reported distinctly from other invalid tokens
    /// so the HTTP layer can tell clients to refresh rather than re-login.
    pub async fn resolve_user(&self, token: &str) -> Result<AuthUser> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("identity provider: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let user = response
                .json::<AuthUser>()
                .await
                .map_err(|e| ApiError::Upstream(format!("identity provider: {e}")))?;
            return Ok(user);
        }

        let detail = response
            .json::<AuthErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_default();

        if status.as_u16() == 401 && detail.to_lowercase().contains("expired") {
            return Err(ApiError::TokenExpired);
        }
        if status.is_client_error() {
            return Err(ApiError::Unauthorized("Invalid or missing token".to_string()));
        }
        Err(ApiError::Upstream(format!("identity provider: {status} {detail}")))
    }

    /// Password grant: exchange email/password for a token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        self.token_request(
            "password",
            json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Refresh grant: exchange a refresh token for a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        self.token_request(
            "refresh_token",
            json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    async fn token_request(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<TokenResponse> {
        let response = self
            .client
            .post(format!(
                "{}/auth/v1/token?grant_type={grant_type}",
                self.base_url
            ))
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("identity provider: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<AuthErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| status.to_string());
            if status.is_client_error() {
                return Err(ApiError::Unauthorized(detail));
            }
            return Err(ApiError::Upstream(format!("identity provider: {detail}")));
        }

        let session = response
            .json::<SessionBody>()
            .await
            .map_err(|e| ApiError::Upstream(format!("identity provider: {e}")))?;

        Ok(TokenResponse {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
        })
    }
}
