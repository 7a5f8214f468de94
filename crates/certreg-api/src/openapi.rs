//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Documents the `x-actor` caller-identity header.
struct ActorHeaderAddon;

impl Modify for ActorHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "actor_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    crate::extract::ACTOR_HEADER,
                    "Authenticated caller identity, supplied by the hosting environment. \
                     Required on every mutating route.",
                ))),
            );
        }
    }
}

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "certreg API — Certificate Registry",
        version = "0.2.0",
        description = "HTTP boundary for the certificate registry.\n\nProvides:\n- **Issuer management** (admin-gated authorize/revoke, public membership query)\n- **Certificate lifecycle** (issue, look up, verify, revoke, per-recipient listing)\n- **Metadata proxy** to a content-addressed store\n\nCaller identity travels in the `x-actor` header; the registry trusts the identity the environment hands it. Health probes (`/health/*`) require no identity.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Issuers ─────────────────────────────────────────────────────
        crate::routes::issuers::authorize_issuer,
        crate::routes::issuers::revoke_issuer,
        crate::routes::issuers::issuer_status,
        // ── Certificates ────────────────────────────────────────────────
        crate::routes::certificates::issue_certificate,
        crate::routes::certificates::get_certificate,
        crate::routes::certificates::verify_certificate,
        crate::routes::certificates::revoke_certificate,
        crate::routes::certificates::recipient_certificates,
        // ── Metadata ────────────────────────────────────────────────────
        crate::routes::metadata::upload_metadata,
        crate::routes::metadata::fetch_metadata,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::issuers::AuthorizeIssuerRequest,
        crate::routes::issuers::IssuerEventResponse,
        crate::routes::issuers::IssuerStatusResponse,
        crate::routes::certificates::IssueCertificateRequest,
        crate::routes::certificates::CertificateBody,
        crate::routes::certificates::VerifyResponse,
        crate::routes::certificates::RevokeCertificateRequest,
        crate::routes::certificates::RecipientCertificatesResponse,
        crate::routes::metadata::MetadataRequest,
        crate::routes::metadata::MetadataResponse,
        crate::routes::metadata::FetchMetadataResponse,
    )),
    modifiers(&ActorHeaderAddon),
    tags(
        (name = "certreg", description = "Certificate registry operations"),
    ),
)]
pub struct ApiDoc;

/// Build the OpenAPI router (`/openapi.json`).
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
