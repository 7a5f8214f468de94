//! # Issuer Management Routes
//!
//! Admin-gated authorization and revocation of issuer identities, plus
//! the public membership query. All semantics live in certreg-core; the
//! handlers only translate between HTTP and the registry's guarded entry
//! points.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use certreg_core::{AccountId, RegistryEvent};

use crate::error::ApiError;
use crate::extract::Actor;
use crate::state::AppState;

/// Build the issuer management router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/issuers", axum::routing::post(authorize_issuer))
        .route(
            "/v1/issuers/:identity",
            get(issuer_status).delete(revoke_issuer),
        )
}

/// Request to add an identity to the issuer set.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthorizeIssuerRequest {
    /// The identity to authorize.
    #[schema(value_type = String)]
    pub target: AccountId,
}

/// Result of an issuer-set mutation, mirroring the emitted event.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssuerEventResponse {
    /// The identity the operation applied to.
    pub target: String,
    /// Environment timestamp of the mutation.
    pub timestamp: DateTime<Utc>,
}

/// Membership query response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssuerStatusResponse {
    /// The queried identity.
    pub identity: String,
    /// Whether the identity is currently an authorized issuer.
    pub authorized: bool,
}

impl IssuerEventResponse {
    fn from_event(event: &RegistryEvent) -> Self {
        match event {
            RegistryEvent::IssuerAuthorized { target, timestamp }
            | RegistryEvent::IssuerRevoked { target, timestamp } => Self {
                target: target.to_string(),
                timestamp: *timestamp,
            },
            // Issuer routes only ever produce issuer events.
            _ => unreachable!("issuer route produced a certificate event"),
        }
    }
}

/// POST /v1/issuers — add an identity to the issuer set (admin only).
#[utoipa::path(
    post,
    path = "/v1/issuers",
    request_body = AuthorizeIssuerRequest,
    responses(
        (status = 200, description = "Issuer authorized", body = IssuerEventResponse),
        (status = 401, description = "Missing caller identity"),
        (status = 403, description = "Caller is not the admin"),
    ),
)]
pub(crate) async fn authorize_issuer(
    State(state): State<AppState>,
    Actor(caller): Actor,
    Json(request): Json<AuthorizeIssuerRequest>,
) -> Result<Json<IssuerEventResponse>, ApiError> {
    let event = state
        .registry
        .write()
        .authorize_issuer(&caller, request.target, Utc::now())?;
    tracing::info!(caller = %caller, event = ?event, "issuer authorized");
    Ok(Json(IssuerEventResponse::from_event(&event)))
}

/// DELETE /v1/issuers/{identity} — remove an identity from the issuer
/// set (admin only; the admin itself cannot be removed).
#[utoipa::path(
    delete,
    path = "/v1/issuers/{identity}",
    params(("identity" = String, Path, description = "Issuer identity to revoke")),
    responses(
        (status = 200, description = "Issuer revoked", body = IssuerEventResponse),
        (status = 401, description = "Missing caller identity"),
        (status = 403, description = "Caller is not the admin"),
        (status = 409, description = "Target is the admin"),
    ),
)]
pub(crate) async fn revoke_issuer(
    State(state): State<AppState>,
    Actor(caller): Actor,
    Path(identity): Path<String>,
) -> Result<Json<IssuerEventResponse>, ApiError> {
    let target = AccountId::new(identity).map_err(ApiError::from)?;
    let event = state
        .registry
        .write()
        .revoke_issuer(&caller, target, Utc::now())?;
    tracing::info!(caller = %caller, event = ?event, "issuer revoked");
    Ok(Json(IssuerEventResponse::from_event(&event)))
}

/// GET /v1/issuers/{identity} — issuer-set membership. Public query.
#[utoipa::path(
    get,
    path = "/v1/issuers/{identity}",
    params(("identity" = String, Path, description = "Identity to query")),
    responses(
        (status = 200, description = "Membership status", body = IssuerStatusResponse),
    ),
)]
pub(crate) async fn issuer_status(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<IssuerStatusResponse>, ApiError> {
    let id = AccountId::new(identity).map_err(ApiError::from)?;
    let authorized = state.registry.read().is_authorized_issuer(&id);
    Ok(Json(IssuerStatusResponse {
        identity: id.to_string(),
        authorized,
    }))
}
