//! # Content-Addressed Store Client
//!
//! Thin reqwest client for an IPFS HTTP API node. The registry only ever
//! sees the returned pointer as an opaque non-empty string; this client
//! exists so the API layer can store and fetch the metadata documents
//! those pointers address.
//!
//! There is no simulation fallback: a registry must never hand out
//! pointers that resolve nowhere, so an unconfigured store surfaces as
//! 503 at the routes instead.

use thiserror::Error;

/// Errors from metadata store operations.
#[derive(Error, Debug)]
pub enum IpfsError {
    /// Transport-level failure reaching the node.
    #[error("ipfs request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-success status.
    #[error("ipfs node returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The node's response could not be decoded.
    #[error("ipfs response could not be decoded: {0}")]
    Decode(String),
}

/// Response shape of `/api/v0/add`.
#[derive(Debug, serde::Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

/// Client for the IPFS HTTP API (`/api/v0/*`).
#[derive(Debug, Clone)]
pub struct IpfsClient {
    base_url: String,
    http: reqwest::Client,
}

impl IpfsClient {
    /// Create a client against `base_url` (e.g. `http://localhost:5001`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// The configured node base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store a JSON document and return its content address.
    pub async fn add_json(&self, document: &serde_json::Value) -> Result<String, IpfsError> {
        let bytes =
            serde_json::to_vec(document).map_err(|e| IpfsError::Decode(e.to_string()))?;
        let part = reqwest::multipart::Part::bytes(bytes).file_name("metadata.json");
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/api/v0/add", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;

        let added: AddResponse = response
            .json()
            .await
            .map_err(|e| IpfsError::Decode(e.to_string()))?;
        if added.hash.is_empty() {
            return Err(IpfsError::Decode("node returned an empty hash".to_string()));
        }
        Ok(added.hash)
    }

    /// Fetch the JSON document a pointer addresses.
    pub async fn cat_json(&self, pointer: &str) -> Result<serde_json::Value, IpfsError> {
        let response = self
            .http
            .post(format!("{}/api/v0/cat", self.base_url))
            .query(&[("arg", pointer)])
            .send()
            .await?;
        let response = check_status(response).await?;

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| IpfsError::Decode(e.to_string()))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, IpfsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(IpfsError::Status { status, body })
}
