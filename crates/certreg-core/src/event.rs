//! # Registry Events
//!
//! Every successful mutating operation emits exactly one event, returned
//! to the caller alongside the state change. The registry keeps no
//! internal event log — delivery, persistence, and fan-out are the
//! hosting environment's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{AccountId, CertificateId, MetadataPointer};

/// An event emitted by a successful registry mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// An identity was added to the issuer set (or re-added; the event
    /// is emitted either way).
    IssuerAuthorized {
        target: AccountId,
        timestamp: DateTime<Utc>,
    },

    /// An identity was removed from the issuer set.
    IssuerRevoked {
        target: AccountId,
        timestamp: DateTime<Utc>,
    },

    /// A new certificate was minted.
    CertificateIssued {
        id: CertificateId,
        issuer: AccountId,
        recipient: AccountId,
        metadata_pointer: MetadataPointer,
        timestamp: DateTime<Utc>,
    },

    /// A certificate was invalidated.
    CertificateRevoked {
        id: CertificateId,
        revoker: AccountId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl RegistryEvent {
    /// The timestamp the hosting environment supplied for this event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::IssuerAuthorized { timestamp, .. }
            | Self::IssuerRevoked { timestamp, .. }
            | Self::CertificateIssued { timestamp, .. }
            | Self::CertificateRevoked { timestamp, .. } => *timestamp,
        }
    }
}
