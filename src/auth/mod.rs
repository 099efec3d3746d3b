//! Admin identity: the provider seam, session claims and the gate state.

pub mod claims;
pub mod gate;
pub mod supabase;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use claims::{verify_access_token, Claims};
pub use gate::GateState;
pub use supabase::SupabaseAuth;

use crate::config::ConfigError;

/// Signed-in back-office user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: Option<String>,
}

/// Tokens returned by a successful password sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AdminUser,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rejected by the provider; the message is shown to the user as is
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Auth API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Password sign-in, session lookup and sign-out at the identity provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// `Ok(None)` when the token does not belong to a live session
    async fn current_user(&self, access_token: &str) -> Result<Option<AdminUser>, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
