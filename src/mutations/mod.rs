//! Admin write actions.
//!
//! Each action validates raw form input, performs one store write and then
//! revalidates the cached pages that show the changed data. Results use the
//! `{ ok, message, postId? }` shape the admin forms render inline.

pub mod about;
pub mod blog;
pub mod faq;
pub mod form;
pub mod gallery;
pub mod hero;
pub mod services;

use axum::{http::StatusCode, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use tracing::{error, info};

use crate::cache::PageCache;
use crate::database::StoreError;
use crate::types::Operation;

pub use form::FormData;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionState {
    pub ok: bool,
    pub message: String,
    #[serde(rename = "postId", skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

impl ActionState {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            post_id: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            post_id: None,
        }
    }

    pub fn with_post_id(mut self, id: impl Into<String>) -> Self {
        self.post_id = Some(id.into());
        self
    }
}

impl IntoResponse for ActionState {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

/// A rejected admin action; the message is what the form shows
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Upload(String),
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        ActionError::Validation(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            ActionError::Validation(msg)
            | ActionError::Conflict(msg)
            | ActionError::NotFound(msg)
            | ActionError::Store(msg)
            | ActionError::Upload(msg) => msg,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Validation(_) => StatusCode::BAD_REQUEST,
            ActionError::Conflict(_) => StatusCode::CONFLICT,
            ActionError::NotFound(_) => StatusCode::NOT_FOUND,
            ActionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ActionError::Upload(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(ActionState::failure(self.message()))).into_response()
    }
}

pub type ActionResult = Result<ActionState, ActionError>;

/// Log the underlying store error and hide it behind the form's message
pub(crate) fn store_failure(
    operation: Operation,
    entity: &str,
    err: StoreError,
    message: &str,
) -> ActionError {
    error!("{} {} failed: {}", entity, operation, err);
    match err {
        StoreError::Conflict(_) => ActionError::Conflict(message.to_string()),
        StoreError::NotFound(_) => ActionError::NotFound(message.to_string()),
        _ => ActionError::Store(message.to_string()),
    }
}

pub(crate) async fn revalidate(cache: &PageCache, operation: Operation, entity: &str, paths: &[String]) {
    info!("{} {}; revalidating {}", entity, operation, paths.join(", "));
    cache.revalidate(paths).await;
}

/// Prices live in `NUMERIC(12, 2)` columns
const PRICE_SCALE: usize = 2;
const PRICE_DIGITS: i64 = 10_000_000_000;

/// Parse a form price such as `18500`, `18500.50` or `1.85e4`.
///
/// Digit separators, more than two decimals and values of 10^10 or more are
/// rejected rather than rounded by the database.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.contains('_') {
        return None;
    }
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()?;

    let decimals = if raw.contains(|c: char| c == 'e' || c == 'E') {
        value.normalize().scale() as usize
    } else {
        raw.split_once('.')
            .map_or(0, |(_, fraction)| fraction.trim_end_matches('0').len())
    };
    if decimals > PRICE_SCALE || value.abs() >= Decimal::from(PRICE_DIGITS) {
        return None;
    }
    Some(value)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::database::MemoryStore;
    use crate::state::AppState;

    pub fn state_with(store: Arc<MemoryStore>) -> AppState {
        AppState::new(AppConfig::development(), store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimals() {
        assert_eq!(parse_decimal("18500"), Some(Decimal::new(18500, 0)));
        assert_eq!(parse_decimal("18500.50"), Some(Decimal::new(1850050, 2)));
        assert_eq!(parse_decimal("1.85e4"), Some(Decimal::new(18500, 0)));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("18500.500"), Some(Decimal::new(18500, 0)));
        assert_eq!(parse_decimal("9999999999.99"), Some(Decimal::new(999999999999, 2)));
    }

    #[test]
    fn rejects_prices_outside_numeric_12_2() {
        assert_eq!(parse_decimal("1_000"), None);
        assert_eq!(parse_decimal("0.0000000000000000000000000000001"), None);
        assert_eq!(parse_decimal("0.001"), None);
        assert_eq!(parse_decimal("1.2345e1"), None);
        assert_eq!(parse_decimal("10000000000"), None);
        assert_eq!(parse_decimal("-10000000000"), None);
        assert_eq!(parse_decimal("1e-100"), None);
    }

    #[test]
    fn action_error_statuses() {
        assert_eq!(ActionError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ActionError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ActionError::Upload("x".into()).status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn store_conflicts_keep_the_form_message() {
        let err = store_failure(
            Operation::Create,
            "gallery item",
            StoreError::Conflict("duplicate key".into()),
            "Error creating item. ID may already exist.",
        );
        assert_eq!(err, ActionError::Conflict("Error creating item. ID may already exist.".into()));
    }

    #[test]
    fn post_id_is_only_serialized_when_present() {
        let plain = serde_json::to_value(ActionState::success("Saved")).unwrap();
        assert!(plain.get("postId").is_none());
        let with_id = serde_json::to_value(ActionState::success("Saved").with_post_id("p1")).unwrap();
        assert_eq!(with_id["postId"], "p1");
    }
}
