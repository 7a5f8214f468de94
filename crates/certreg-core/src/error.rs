//! # Registry Error Taxonomy
//!
//! Four error kinds cover every failure the registry can produce:
//! authorization, validation, not-found, and lifecycle-state violations.
//! Every check runs before any mutation begins, so a returned error
//! guarantees the registry state is identical to before the call.
//!
//! The registry never logs, retries, or suppresses — errors propagate
//! synchronously to the caller, and surrounding layers translate them
//! into user-facing responses.

use thiserror::Error;

use crate::identity::CertificateId;

/// Errors returned by registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The caller lacks the required role for the operation.
    #[error("unauthorized: {0}")]
    Authorization(String),

    /// Malformed input, e.g. an empty metadata pointer.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced certificate id does not exist.
    #[error("certificate {0} not found")]
    NotFound(CertificateId),

    /// The operation violates a lifecycle invariant, e.g. revoking an
    /// already-revoked certificate or revoking the admin's issuer status.
    #[error("invalid state: {0}")]
    State(String),
}

impl RegistryError {
    /// Admin-gated operation attempted by a non-admin caller.
    pub(crate) fn admin_only() -> Self {
        Self::Authorization("only admin can perform this action".to_string())
    }

    /// Issuance attempted by an identity outside the issuer set.
    pub(crate) fn issuer_only() -> Self {
        Self::Authorization("only authorized issuers can perform this action".to_string())
    }

    /// Revocation attempted by someone other than the certificate's
    /// issuer of record or the admin.
    pub(crate) fn revoker_only() -> Self {
        Self::Authorization("only issuer or admin can revoke".to_string())
    }
}
