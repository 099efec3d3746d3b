use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::{AdminUser, AuthError};

/// Access token claims issued by the identity provider
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: i64,
}

impl From<Claims> for AdminUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

/// Validate an HS256 access token against the project JWT secret
pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSession("JWT secret not configured".to_string()));
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["authenticated"]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| AuthError::InvalidSession(format!("Invalid JWT token: {}", e)))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token(secret: &str, exp_offset: Duration) -> String {
        let claims = json!({
            "sub": "4b1c0e1a-admin",
            "email": "admin@IVA.co.za",
            "role": "authenticated",
            "aud": "authenticated",
            "exp": (Utc::now() + exp_offset).timestamp(),
        });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn accepts_token_signed_with_project_secret() {
        let claims = verify_access_token(&token("s3cret", Duration::hours(1)), "s3cret").unwrap();
        let user = AdminUser::from(claims);
        assert_eq!(user.id, "4b1c0e1a-admin");
        assert_eq!(user.email.as_deref(), Some("admin@IVA.co.za"));
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        assert!(verify_access_token(&token("other", Duration::hours(1)), "s3cret").is_err());
        assert!(verify_access_token(&token("s3cret", Duration::hours(-2)), "s3cret").is_err());
        assert!(verify_access_token("not-a-jwt", "").is_err());
    }
}
