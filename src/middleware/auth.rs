use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::auth::{AdminUser, GateState};
use crate::error::ApiError;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/admin/login";

/// Authenticated admin context inserted by [`require_admin`]
#[derive(Clone, Debug)]
pub struct AdminSession {
    pub user: AdminUser,
    pub access_token: String,
}

/// Session gate in front of every admin route.
///
/// Unauthenticated `GET` requests are sent to the login page; anything else
/// gets a 401 so form posts never silently land on a redirect.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers(), &state.config.security.session_cookie);

    let gate = match &state.auth {
        Some(provider) => GateState::resolve(provider.as_ref(), token.as_deref())
            .await
            .unwrap_or_else(|e| {
                warn!("Session lookup failed: {}", e);
                GateState::Unauthenticated
            }),
        None => GateState::Unauthenticated,
    };

    match (gate, token) {
        (GateState::Authenticated(user), Some(access_token)) => {
            request
                .extensions_mut()
                .insert(AdminSession { user, access_token });
            next.run(request).await
        }
        _ => {
            warn!("Rejected admin request: {} {}", request.method(), request.uri().path());
            if request.method() == Method::GET {
                Redirect::to(LOGIN_PATH).into_response()
            } else {
                ApiError::unauthorized("Authentication required").into_response()
            }
        }
    }
}

/// Token from the session cookie, falling back to a `Bearer` header
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    cookie_value(headers, cookie_name).or_else(|| bearer_token(headers))
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; iva_admin_session=abc.def; other=1"),
        );
        assert_eq!(session_token(&headers, "iva_admin_session").as_deref(), Some("abc.def"));
    }

    #[test]
    fn falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(session_token(&headers, "iva_admin_session").as_deref(), Some("tok"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic tok"));
        assert_eq!(session_token(&headers, "iva_admin_session"), None);
    }

    #[test]
    fn empty_cookie_is_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("iva_admin_session="));
        assert_eq!(session_token(&headers, "iva_admin_session"), None);
    }
}
