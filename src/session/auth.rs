//! HTTP client for the external auth backend
//!
//! The backend owns identity, sessions, and subscription rows; it is
//! consumed as a black box with a handful of verbs. Responses are mapped
//! into local types and nothing else is assumed about it.

use super::{SubscriptionRecord, User};
use crate::config::AuthBackendConfig;
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Signed-in session returned by the backend
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
}

/// Trait for auth backends
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthSession>;

    async fn sign_out(&self, access_token: &str) -> Result<()>;

    async fn reset_password(&self, email: &str) -> Result<()>;

    /// Active subscription rows for a user, unordered
    async fn subscriptions(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<Vec<SubscriptionRecord>>;
}

/// Wire shape of a session response
#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    user: BackendUser,
}

#[derive(Debug, Deserialize)]
struct BackendUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<serde_json::Value>,
}

impl BackendUser {
    /// Map into the local user shape; full name falls back to the email
    /// local part, then a generic label
    fn into_user(self) -> User {
        let email = self.email.unwrap_or_default();
        let full_name = self
            .user_metadata
            .as_ref()
            .and_then(|m| m.get("full_name"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| email.split('@').next().map(str::to_string).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "User".to_string());

        User {
            id: self.id,
            email,
            full_name,
        }
    }
}

/// Client for the auth backend's REST surface
pub struct AuthClient {
    config: AuthBackendConfig,
    http_client: Client,
}

impl AuthClient {
    pub fn new(config: AuthBackendConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ProviderError::Network)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn anon_key(&self) -> &str {
        self.config.anon_key.expose_secret()
    }

    /// Surface the backend's error message on non-2xx, else a generic one
    async fn check_failure(response: reqwest::Response, op: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("msg")
                    .or_else(|| v.get("message"))
                    .or_else(|| v.get("error_description"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("{} failed with status {}", op, status));

        warn!(%status, op, "Auth backend request failed");
        Err(ProviderError::Auth(message).into())
    }
}

#[async_trait]
impl AuthProvider for AuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        debug!(email, "Signing in");

        let response = self
            .http_client
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.config.base_url
            ))
            .header("apikey", self.anon_key())
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let session: SessionResponse = Self::check_failure(response, "sign in")
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(AuthSession {
            user: session.user.into_user(),
            access_token: session.access_token,
        })
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthSession> {
        debug!(email, "Signing up");

        let response = self
            .http_client
            .post(format!("{}/auth/v1/signup", self.config.base_url))
            .header("apikey", self.anon_key())
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name }
            }))
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let session: SessionResponse = Self::check_failure(response, "sign up")
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(AuthSession {
            user: session.user.into_user(),
            access_token: session.access_token,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}/auth/v1/logout", self.config.base_url))
            .header("apikey", self.anon_key())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(ProviderError::Network)?;

        Self::check_failure(response, "sign out").await?;
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}/auth/v1/recover", self.config.base_url))
            .header("apikey", self.anon_key())
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(ProviderError::Network)?;

        Self::check_failure(response, "password reset").await?;
        Ok(())
    }

    async fn subscriptions(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<Vec<SubscriptionRecord>> {
        let response = self
            .http_client
            .get(format!("{}/rest/v1/subscriptions", self.config.base_url))
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("status", "eq.active".to_string()),
                ("select", "*".to_string()),
            ])
            .header("apikey", self.anon_key())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let rows: Vec<SubscriptionRecord> = Self::check_failure(response, "subscription query")
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(rows)
    }
}
