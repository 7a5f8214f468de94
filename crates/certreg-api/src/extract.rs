//! # Caller Identity Extraction
//!
//! The registry core trusts the caller identity the hosting environment
//! hands it — it performs no signature verification. At the HTTP
//! boundary that identity arrives in the `x-actor` header; upstream
//! infrastructure (gateway, session layer) is responsible for having
//! authenticated it. A request without a well-formed identity is
//! rejected with 401 before any handler runs.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use certreg_core::AccountId;

use crate::error::ApiError;

/// Header carrying the authenticated caller identity.
pub const ACTOR_HEADER: &str = "x-actor";

/// The authenticated caller of the current request.
#[derive(Debug, Clone)]
pub struct Actor(pub AccountId);

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(ACTOR_HEADER).ok_or_else(|| {
            ApiError::Unauthorized(format!("missing {ACTOR_HEADER} header"))
        })?;
        let raw = value
            .to_str()
            .map_err(|_| ApiError::Unauthorized(format!("{ACTOR_HEADER} header is not valid UTF-8")))?;
        let id = AccountId::new(raw)
            .map_err(|e| ApiError::Unauthorized(format!("{ACTOR_HEADER} header invalid: {e}")))?;
        Ok(Actor(id))
    }
}
