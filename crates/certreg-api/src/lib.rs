//! # certreg-api — HTTP Boundary for the Certificate Registry
//!
//! Thin axum layer over [`certreg_core`]. All authorization and lifecycle
//! semantics live in the core crate; handlers translate between HTTP and
//! the registry's guarded entry points, and map [`certreg_core::RegistryError`]
//! kinds onto status codes.
//!
//! ## Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST   | `/v1/issuers` | Authorize an issuer (admin only) |
//! | DELETE | `/v1/issuers/{identity}` | Revoke an issuer (admin only) |
//! | GET    | `/v1/issuers/{identity}` | Issuer-set membership query |
//! | POST   | `/v1/certificates` | Issue a certificate (issuers only) |
//! | GET    | `/v1/certificates/{id}` | Look up a certificate |
//! | GET    | `/v1/certificates/{id}/verify` | Validity check |
//! | POST   | `/v1/certificates/{id}/revoke` | Revoke (issuer of record or admin) |
//! | GET    | `/v1/recipients/{identity}/certificates` | Ids issued to a recipient |
//! | POST   | `/v1/metadata` | Store a metadata document |
//! | GET    | `/v1/metadata/{pointer}` | Fetch a stored document |
//! | GET    | `/openapi.json` | OpenAPI spec |
//! | GET    | `/health/liveness` | Process is up |
//! | GET    | `/health/readiness` | Registry is serviceable |
//!
//! Caller identity arrives in the `x-actor` header, placed there by the
//! hosting environment. Queries and health probes need no identity.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod extract;
pub mod ipfs;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::{AppConfig, AppState};

/// Maximum request body size. Metadata documents are small JSON blobs;
/// anything larger is a mistake.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::issuers::router())
        .merge(routes::certificates::router())
        .merge(routes::metadata::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    // A writer that never releases the lock means the registry cannot
    // serve traffic; report that rather than hanging the probe.
    match state.registry.try_read() {
        Some(_) => Ok("ready"),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
