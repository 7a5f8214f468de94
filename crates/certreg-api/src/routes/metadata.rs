//! # Metadata Proxy Routes
//!
//! Stores certificate metadata documents in the content-addressed store
//! and fetches them back by pointer. The registry core never sees the
//! document — only the opaque pointer the store returns. Without a
//! configured store these routes answer 503; fabricating pointers that
//! resolve nowhere is worse than refusing.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::ipfs::{IpfsClient, IpfsError};
use crate::state::AppState;

/// Build the metadata proxy router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/metadata", post(upload_metadata))
        .route("/v1/metadata/:pointer", get(fetch_metadata))
}

/// Certificate metadata document to store off-chain.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetadataRequest {
    /// Name of the certificate holder.
    pub name: String,
    /// Course or program the certificate attests.
    pub course: String,
    /// Completion or award date, as supplied by the issuer.
    pub date: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Recipient identity, for cross-reference with the on-ledger record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Upload result: the pointer to hand to certificate issuance, plus the
/// document as stored (including the server-side timestamp).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetadataResponse {
    pub pointer: String,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
}

/// Stored document fetched by pointer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FetchMetadataResponse {
    pub pointer: String,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
}

fn require_ipfs(state: &AppState) -> Result<&IpfsClient, ApiError> {
    state.ipfs.as_deref().ok_or_else(|| {
        ApiError::service_unavailable(
            "metadata store not configured; set CERTREG_IPFS_URL to an IPFS HTTP API",
        )
    })
}

impl From<IpfsError> for ApiError {
    fn from(err: IpfsError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

/// POST /v1/metadata — store a metadata document, returning its pointer.
#[utoipa::path(
    post,
    path = "/v1/metadata",
    request_body = MetadataRequest,
    responses(
        (status = 200, description = "Document stored", body = MetadataResponse),
        (status = 422, description = "Missing required fields"),
        (status = 502, description = "Store error"),
        (status = 503, description = "No store configured"),
    ),
)]
pub(crate) async fn upload_metadata(
    State(state): State<AppState>,
    Json(request): Json<MetadataRequest>,
) -> Result<Json<MetadataResponse>, ApiError> {
    for (field, value) in [
        ("name", &request.name),
        ("course", &request.course),
        ("date", &request.date),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} must not be empty")));
        }
    }

    let ipfs = require_ipfs(&state)?;
    let mut document = serde_json::to_value(&request)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    // Stamp the document the way the store will serve it back.
    document["timestamp"] = serde_json::Value::String(Utc::now().to_rfc3339());

    let pointer = ipfs.add_json(&document).await?;
    tracing::info!(%pointer, "metadata document stored");
    Ok(Json(MetadataResponse {
        pointer,
        metadata: document,
    }))
}

/// GET /v1/metadata/{pointer} — fetch a stored metadata document.
#[utoipa::path(
    get,
    path = "/v1/metadata/{pointer}",
    params(("pointer" = String, Path, description = "Content address")),
    responses(
        (status = 200, description = "Stored document", body = FetchMetadataResponse),
        (status = 422, description = "Empty pointer"),
        (status = 502, description = "Store error"),
        (status = 503, description = "No store configured"),
    ),
)]
pub(crate) async fn fetch_metadata(
    State(state): State<AppState>,
    Path(pointer): Path<String>,
) -> Result<Json<FetchMetadataResponse>, ApiError> {
    if pointer.trim().is_empty() {
        return Err(ApiError::Validation(
            "metadata pointer cannot be empty".to_string(),
        ));
    }
    let ipfs = require_ipfs(&state)?;
    let metadata = ipfs.cat_json(&pointer).await?;
    Ok(Json(FetchMetadataResponse { pointer, metadata }))
}
