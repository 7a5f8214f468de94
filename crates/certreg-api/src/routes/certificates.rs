//! # Certificate Routes
//!
//! Issuance, lookup, verification, revocation, and the per-recipient
//! listing. The response body keeps the ledger's external field names
//! (`is_revoked`, `revoke_reason`) so verifiers see the same shape the
//! record has always had, with the richer revocation audit fields
//! alongside.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use certreg_core::{AccountId, Certificate, CertificateId, MetadataPointer};

use crate::error::ApiError;
use crate::extract::Actor;
use crate::state::AppState;

/// Build the certificate router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/certificates", post(issue_certificate))
        .route("/v1/certificates/:id", get(get_certificate))
        .route("/v1/certificates/:id/verify", get(verify_certificate))
        .route("/v1/certificates/:id/revoke", post(revoke_certificate))
        .route(
            "/v1/recipients/:identity/certificates",
            get(recipient_certificates),
        )
}

/// Request to mint a certificate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueCertificateRequest {
    /// Identity the certificate is issued to.
    #[schema(value_type = String)]
    pub recipient: AccountId,
    /// Content address of the metadata document. Rejected if empty.
    pub metadata_pointer: String,
}

/// A certificate record as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CertificateBody {
    pub id: u64,
    pub issuer: String,
    pub recipient: String,
    pub metadata_pointer: String,
    pub issued_at: DateTime<Utc>,
    pub is_revoked: bool,
    /// Empty until the certificate is revoked.
    pub revoke_reason: String,
    /// Who performed the revocation, once revoked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_by: Option<String>,
    /// When the revocation took effect, once revoked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl From<&Certificate> for CertificateBody {
    fn from(cert: &Certificate) -> Self {
        Self {
            id: cert.id.value(),
            issuer: cert.issuer.to_string(),
            recipient: cert.recipient.to_string(),
            metadata_pointer: cert.metadata_pointer.to_string(),
            issued_at: cert.issued_at,
            is_revoked: cert.is_revoked(),
            revoke_reason: cert.revoke_reason().to_string(),
            revoked_by: cert
                .revocation
                .as_ref()
                .map(|r| r.revoked_by.to_string()),
            revoked_at: cert.revocation.as_ref().map(|r| r.revoked_at),
        }
    }
}

/// Verification response: validity folded into a single boolean, with
/// the full record alongside for callers that want the details.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub certificate: CertificateBody,
}

/// Request to revoke a certificate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RevokeCertificateRequest {
    /// Why the certificate is being invalidated. May be empty.
    #[serde(default)]
    pub reason: String,
}

/// Per-recipient listing, in issuance order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipientCertificatesResponse {
    pub recipient: String,
    pub certificate_ids: Vec<u64>,
}

/// POST /v1/certificates — mint a certificate (authorized issuers only).
#[utoipa::path(
    post,
    path = "/v1/certificates",
    request_body = IssueCertificateRequest,
    responses(
        (status = 201, description = "Certificate issued", body = CertificateBody),
        (status = 401, description = "Missing caller identity"),
        (status = 403, description = "Caller is not an authorized issuer"),
        (status = 422, description = "Empty metadata pointer"),
    ),
)]
pub(crate) async fn issue_certificate(
    State(state): State<AppState>,
    Actor(caller): Actor,
    Json(request): Json<IssueCertificateRequest>,
) -> Result<(StatusCode, Json<CertificateBody>), ApiError> {
    let pointer = MetadataPointer::new(request.metadata_pointer).map_err(ApiError::from)?;
    let mut registry = state.registry.write();
    let (id, event) =
        registry.issue_certificate(&caller, request.recipient, pointer, Utc::now())?;
    tracing::info!(caller = %caller, event = ?event, "certificate issued");
    let body = CertificateBody::from(registry.get_certificate(id)?);
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /v1/certificates/{id} — look up a certificate. Public query.
#[utoipa::path(
    get,
    path = "/v1/certificates/{id}",
    params(("id" = u64, Path, description = "Certificate id")),
    responses(
        (status = 200, description = "Certificate record", body = CertificateBody),
        (status = 404, description = "No certificate with this id"),
    ),
)]
pub(crate) async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CertificateBody>, ApiError> {
    let registry = state.registry.read();
    let cert = registry.get_certificate(CertificateId::new(id))?;
    Ok(Json(CertificateBody::from(cert)))
}

/// GET /v1/certificates/{id}/verify — validity check. Public query.
#[utoipa::path(
    get,
    path = "/v1/certificates/{id}/verify",
    params(("id" = u64, Path, description = "Certificate id")),
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
        (status = 404, description = "No certificate with this id"),
    ),
)]
pub(crate) async fn verify_certificate(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let registry = state.registry.read();
    let (valid, cert) = registry.verify_certificate(CertificateId::new(id))?;
    Ok(Json(VerifyResponse {
        valid,
        certificate: CertificateBody::from(cert),
    }))
}

/// POST /v1/certificates/{id}/revoke — invalidate a certificate
/// (issuer of record or admin).
#[utoipa::path(
    post,
    path = "/v1/certificates/{id}/revoke",
    params(("id" = u64, Path, description = "Certificate id")),
    request_body = RevokeCertificateRequest,
    responses(
        (status = 200, description = "Certificate revoked", body = CertificateBody),
        (status = 401, description = "Missing caller identity"),
        (status = 403, description = "Caller is neither issuer of record nor admin"),
        (status = 404, description = "No certificate with this id"),
        (status = 409, description = "Certificate already revoked"),
    ),
)]
pub(crate) async fn revoke_certificate(
    State(state): State<AppState>,
    Actor(caller): Actor,
    Path(id): Path<u64>,
    Json(request): Json<RevokeCertificateRequest>,
) -> Result<Json<CertificateBody>, ApiError> {
    let id = CertificateId::new(id);
    let mut registry = state.registry.write();
    let event = registry.revoke_certificate(&caller, id, request.reason, Utc::now())?;
    tracing::info!(caller = %caller, event = ?event, "certificate revoked");
    let body = CertificateBody::from(registry.get_certificate(id)?);
    Ok(Json(body))
}

/// GET /v1/recipients/{identity}/certificates — ids issued to a
/// recipient, in issuance order. Public query; unknown recipients get an
/// empty list, not an error.
#[utoipa::path(
    get,
    path = "/v1/recipients/{identity}/certificates",
    params(("identity" = String, Path, description = "Recipient identity")),
    responses(
        (status = 200, description = "Certificate ids in issuance order", body = RecipientCertificatesResponse),
    ),
)]
pub(crate) async fn recipient_certificates(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<RecipientCertificatesResponse>, ApiError> {
    let recipient = AccountId::new(identity).map_err(ApiError::from)?;
    let registry = state.registry.read();
    let certificate_ids = registry
        .get_recipient_certificates(&recipient)
        .iter()
        .map(|id| id.value())
        .collect();
    Ok(Json(RecipientCertificatesResponse {
        recipient: recipient.to_string(),
        certificate_ids,
    }))
}
