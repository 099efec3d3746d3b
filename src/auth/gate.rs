use super::{AdminUser, AuthError, AuthProvider};

/// Where a request stands with respect to the admin session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Checking,
    Unauthenticated,
    Authenticated(AdminUser),
}

impl GateState {
    /// Resolve the optional session token through the provider.
    ///
    /// Provider failures are returned so the caller can log them; they never
    /// grant access.
    pub async fn resolve(
        provider: &dyn AuthProvider,
        token: Option<&str>,
    ) -> Result<GateState, AuthError> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(GateState::Unauthenticated);
        };

        Ok(match provider.current_user(token).await? {
            Some(user) => GateState::Authenticated(user),
            None => GateState::Unauthenticated,
        })
    }

    pub fn user(&self) -> Option<&AdminUser> {
        match self {
            GateState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

impl Default for GateState {
    fn default() -> Self {
        GateState::Checking
    }
}
