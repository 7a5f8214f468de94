//! # Certificate Record
//!
//! An immutable issuance record plus a one-way revocation flag. Two
//! lifecycle states exist: **Issued** (initial) and **Revoked**
//! (terminal). The only transition is Issued → Revoked, performed by
//! [`CertificateRegistry::revoke_certificate`](crate::CertificateRegistry::revoke_certificate);
//! nothing ever returns a certificate to Issued, and no certificate is
//! ever deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{AccountId, CertificateId, MetadataPointer};

/// The one-way revocation record.
///
/// Existence of this record *is* the revoked flag: a certificate with
/// `revocation: Some(..)` is revoked, and the record is set exactly once.
/// `revoked_by` and `revoked_at` capture the audit data the revocation
/// event carries, so the ledger itself answers "who invalidated this and
/// when" without replaying events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revocation {
    /// Why the certificate was invalidated. May be empty — no constraint
    /// is placed on the reason's content.
    pub reason: String,
    /// The identity that performed the revocation (issuer of record or
    /// admin).
    pub revoked_by: AccountId,
    /// When the revocation took effect.
    pub revoked_at: DateTime<Utc>,
}

/// A single issuance record in the ledger.
///
/// Every field except `revocation` is immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Unique id, assigned by the registry at issuance.
    pub id: CertificateId,
    /// The identity that issued this certificate. Revocation rights are
    /// bound to this stored value, not to current issuer-set membership.
    pub issuer: AccountId,
    /// The identity the certificate was issued to.
    pub recipient: AccountId,
    /// Content address of the off-chain metadata document.
    pub metadata_pointer: MetadataPointer,
    /// When the certificate was issued.
    pub issued_at: DateTime<Utc>,
    /// `Some` once (and only once) the certificate has been revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation: Option<Revocation>,
}

impl Certificate {
    /// Whether this certificate has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revocation.is_some()
    }

    /// The revocation reason, or the empty string if the certificate has
    /// not been revoked.
    pub fn revoke_reason(&self) -> &str {
        self.revocation.as_ref().map_or("", |r| r.reason.as_str())
    }

    /// A certificate is valid iff it exists and has not been revoked.
    /// Existence is established by the lookup that produced `self`.
    pub fn is_valid(&self) -> bool {
        !self.is_revoked()
    }
}
