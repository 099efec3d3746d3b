use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{verify_access_token, AdminUser, AuthError, AuthProvider, Session};
use crate::config::SupabaseConfig;

/// Session auth client authenticated with the anon key
pub struct SupabaseAuth {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    jwt_secret: Option<String>,
}

/// Error body shapes returned by the auth API
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}

impl SupabaseAuth {
    /// Fails when the URL or the anon key is not configured
    pub fn new(config: &SupabaseConfig) -> Result<Self, AuthError> {
        let (base_url, anon_key) = config.anon_credentials()?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            jwt_secret: config
                .jwt_secret
                .clone()
                .filter(|secret| !secret.trim().is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn api_error(response: reqwest::Response) -> AuthError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        AuthError::Api { status, body }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .client
            .post(self.url("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let message = response
                .json::<ErrorBody>()
                .await
                .unwrap_or_default()
                .into_message()
                .unwrap_or_else(|| "Invalid login credentials".to_string());
            return Err(AuthError::InvalidCredentials(message));
        }
        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.json::<Session>().await?)
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AdminUser>, AuthError> {
        if let Some(secret) = self.jwt_secret.as_deref() {
            return match verify_access_token(access_token, secret) {
                Ok(claims) => Ok(Some(claims.into())),
                Err(e) => {
                    debug!("Local token check failed: {}", e);
                    Ok(None)
                }
            };
        }

        let response = self
            .client
            .get(self.url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(Some(response.json::<AdminUser>().await?))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }
}
