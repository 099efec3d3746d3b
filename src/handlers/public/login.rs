// handlers/public/login.rs - admin sign-in and sign-out
//
// GET  /admin/login  - login view model
// POST /admin/login  - password sign-in, sets the session cookie
// POST /admin/logout - provider sign-out, clears the session cookie

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info, warn};

use crate::auth::AuthError;
use crate::config::SecurityConfig;
use crate::content::views::LoginView;
use crate::middleware::auth::LOGIN_PATH;
use crate::middleware::{session_token, ApiResponse};
use crate::mutations::FormData;
use crate::state::AppState;

fn login_view(state: &AppState, error: Option<String>) -> LoginView {
    LoginView {
        default_email: state.config.site.admin_default_email.clone(),
        error,
    }
}

fn session_cookie(security: &SecurityConfig, token: &str, max_age: i64) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        security.session_cookie, token, max_age
    );
    if security.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

pub async fn login_get(State(state): State<AppState>) -> Response {
    ApiResponse::success(login_view(&state, None)).into_response()
}

pub async fn login_post(State(state): State<AppState>, form: FormData) -> Response {
    let email = form.text("email");
    let password = form.text("password");

    let Some(auth) = &state.auth else {
        warn!("Login attempted but authentication is not configured");
        let view = login_view(&state, Some("Authentication is not configured.".to_string()));
        return ApiResponse::with_status(view, StatusCode::UNAUTHORIZED).into_response();
    };

    match auth.sign_in(&email, &password).await {
        Ok(session) => {
            info!("Admin signed in: {}", session.user.email.as_deref().unwrap_or(&session.user.id));
            let max_age = session.expires_in.unwrap_or(3600);
            let cookie = session_cookie(&state.config.security, &session.access_token, max_age);
            ([(header::SET_COOKIE, cookie)], Redirect::to("/admin")).into_response()
        }
        Err(AuthError::InvalidCredentials(message)) => {
            warn!("Admin sign-in rejected for {}", email);
            ApiResponse::with_status(login_view(&state, Some(message)), StatusCode::UNAUTHORIZED)
                .into_response()
        }
        Err(e) => {
            error!("Admin sign-in failed: {}", e);
            let view = login_view(&state, Some("Sign-in failed. Please try again.".to_string()));
            ApiResponse::with_status(view, StatusCode::BAD_GATEWAY).into_response()
        }
    }
}

pub async fn logout_post(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let security = &state.config.security;
    if let (Some(auth), Some(token)) = (&state.auth, session_token(&headers, &security.session_cookie)) {
        if let Err(e) = auth.sign_out(&token).await {
            error!("Sign-out failed: {}", e);
        }
    }

    let cookie = session_cookie(security, "", 0);
    ([(header::SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn cookie_attributes_follow_config() {
        let mut config = AppConfig::development();
        let cookie = session_cookie(&config.security, "tok", 3600);
        assert_eq!(cookie, "iva_admin_session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600");

        config.security.secure_cookies = true;
        assert!(session_cookie(&config.security, "", 0).ends_with("Max-Age=0; Secure"));
    }
}
