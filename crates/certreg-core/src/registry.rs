//! # Certificate Registry
//!
//! The registry state machine: one explicit mutable struct owning the
//! admin identity, the issuer set, the append-only certificate store, and
//! the per-recipient index. Every external call passes through a guard
//! check first; only then does state mutate and an event get emitted.
//!
//! ## Transition Discipline
//!
//! Each operation is a deterministic state-transition function: given the
//! current state and one call (operation, arguments, caller identity, the
//! environment's timestamp), it either mutates the state and returns the
//! emitted [`RegistryEvent`], or it fails and leaves the state unchanged.
//! All preconditions run before any mutation — there is no partial
//! update. The hosting environment serializes calls into a total order
//! and supplies authenticated caller identities and a monotonic `now`.
//!
//! ## Invariants
//!
//! After every call:
//!
//! - `next_id` strictly exceeds every id in `certificates`; ids are never
//!   reused, even after revocation.
//! - every id in `recipient_index[r]` maps to a certificate whose
//!   recipient is `r`, in issuance order.
//! - the admin is always a member of the issuer set.
//! - revocation is monotone: once revoked, never un-revoked.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::certificate::{Certificate, Revocation};
use crate::error::RegistryError;
use crate::event::RegistryEvent;
use crate::identity::{AccountId, CertificateId, MetadataPointer};

/// The authoritative certificate registry.
///
/// Created once per deployment and mutated by every subsequent call. All
/// mutation funnels through the guarded methods on this type; no caller
/// may touch `certificates`, `issuers`, or `recipient_index` directly —
/// that discipline is the sole thing preserving the invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRegistry {
    /// The creator's identity. Immutable after initialization; holds
    /// exclusive rights over the issuer set and an implicit right to
    /// revoke any certificate.
    admin: AccountId,
    /// Identities currently authorized to issue. Always contains `admin`.
    issuers: HashSet<AccountId>,
    /// The append-only certificate store, keyed by id. BTreeMap so that
    /// iteration (snapshots, debugging) is in id order.
    certificates: BTreeMap<CertificateId, Certificate>,
    /// Certificate ids per recipient, in issuance order.
    recipient_index: HashMap<AccountId, Vec<CertificateId>>,
    /// The next id to assign. Strictly increasing, starts at 1.
    next_id: u64,
}

impl CertificateRegistry {
    /// Initialize the registry. The caller becomes the admin and is
    /// inserted into the issuer set; both facts hold for the registry's
    /// remaining lifetime.
    pub fn new(admin: AccountId) -> Self {
        let mut issuers = HashSet::new();
        issuers.insert(admin.clone());
        Self {
            admin,
            issuers,
            certificates: BTreeMap::new(),
            recipient_index: HashMap::new(),
            next_id: 1,
        }
    }

    /// The admin identity.
    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    /// Whether `identity` is currently authorized to issue certificates.
    /// Pure query, no side effects.
    pub fn is_authorized_issuer(&self, identity: &AccountId) -> bool {
        self.issuers.contains(identity)
    }

    /// Number of certificates ever issued.
    pub fn certificate_count(&self) -> usize {
        self.certificates.len()
    }

    /// The id the next issuance will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Add `target` to the issuer set. Admin only.
    ///
    /// Re-authorizing an existing issuer is a no-op on the set but still
    /// succeeds and still emits [`RegistryEvent::IssuerAuthorized`] — the
    /// observable behavior of an unconditional set-insert.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Authorization`] if `caller` is not the admin.
    pub fn authorize_issuer(
        &mut self,
        caller: &AccountId,
        target: AccountId,
        now: DateTime<Utc>,
    ) -> Result<RegistryEvent, RegistryError> {
        self.require_admin(caller)?;
        self.issuers.insert(target.clone());
        Ok(RegistryEvent::IssuerAuthorized {
            target,
            timestamp: now,
        })
    }

    /// Remove `target` from the issuer set. Admin only; the admin's own
    /// membership can never be revoked.
    ///
    /// Certificates already issued by `target` are unaffected: they
    /// remain valid and remain revocable by `target`, whose revocation
    /// rights are bound to the stored issuer field at issuance time.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Authorization`] if `caller` is not the admin;
    /// [`RegistryError::State`] if `target` is the admin.
    pub fn revoke_issuer(
        &mut self,
        caller: &AccountId,
        target: AccountId,
        now: DateTime<Utc>,
    ) -> Result<RegistryEvent, RegistryError> {
        self.require_admin(caller)?;
        if target == self.admin {
            return Err(RegistryError::State("cannot revoke admin".to_string()));
        }
        self.issuers.remove(&target);
        Ok(RegistryEvent::IssuerRevoked {
            target,
            timestamp: now,
        })
    }

    /// Mint a new certificate for `recipient`.
    ///
    /// Allocates the next id, stores the record, and appends the id to
    /// the recipient's index. Both the authorization and the pointer
    /// check run before any mutation.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Authorization`] if `caller` is not an authorized
    /// issuer. An empty pointer is rejected at [`MetadataPointer`]
    /// construction, before this method is ever reachable.
    pub fn issue_certificate(
        &mut self,
        caller: &AccountId,
        recipient: AccountId,
        metadata_pointer: MetadataPointer,
        now: DateTime<Utc>,
    ) -> Result<(CertificateId, RegistryEvent), RegistryError> {
        if !self.issuers.contains(caller) {
            return Err(RegistryError::issuer_only());
        }

        let id = CertificateId::new(self.next_id);
        self.next_id += 1;

        let certificate = Certificate {
            id,
            issuer: caller.clone(),
            recipient: recipient.clone(),
            metadata_pointer: metadata_pointer.clone(),
            issued_at: now,
            revocation: None,
        };
        self.certificates.insert(id, certificate);
        self.recipient_index
            .entry(recipient.clone())
            .or_default()
            .push(id);

        let event = RegistryEvent::CertificateIssued {
            id,
            issuer: caller.clone(),
            recipient,
            metadata_pointer,
            timestamp: now,
        };
        Ok((id, event))
    }

    /// Look up a certificate by id. Pure query.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if no certificate has this id.
    pub fn get_certificate(&self, id: CertificateId) -> Result<&Certificate, RegistryError> {
        self.certificates
            .get(&id)
            .ok_or(RegistryError::NotFound(id))
    }

    /// Look up a certificate and fold its revocation status into a single
    /// validity boolean for caller convenience. Pure query.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if no certificate has this id.
    pub fn verify_certificate(
        &self,
        id: CertificateId,
    ) -> Result<(bool, &Certificate), RegistryError> {
        let certificate = self.get_certificate(id)?;
        Ok((certificate.is_valid(), certificate))
    }

    /// Revoke certificate `id` with `reason` (which may be empty).
    ///
    /// Permitted for the certificate's issuer of record or the admin —
    /// the issuer of record keeps this right even after being removed
    /// from the issuer set. The transition is one-way and the reason is
    /// written exactly once.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if the id does not exist;
    /// [`RegistryError::Authorization`] if `caller` is neither the stored
    /// issuer nor the admin; [`RegistryError::State`] if the certificate
    /// is already revoked.
    pub fn revoke_certificate(
        &mut self,
        caller: &AccountId,
        id: CertificateId,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<RegistryEvent, RegistryError> {
        let admin = self.admin.clone();
        let certificate = self
            .certificates
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;

        if *caller != certificate.issuer && *caller != admin {
            return Err(RegistryError::revoker_only());
        }
        if certificate.revocation.is_some() {
            return Err(RegistryError::State(
                "certificate already revoked".to_string(),
            ));
        }

        let reason = reason.into();
        certificate.revocation = Some(Revocation {
            reason: reason.clone(),
            revoked_by: caller.clone(),
            revoked_at: now,
        });
        Ok(RegistryEvent::CertificateRevoked {
            id,
            revoker: caller.clone(),
            reason,
            timestamp: now,
        })
    }

    /// Ids of every certificate issued to `recipient`, in issuance order.
    /// Pure query; an unknown recipient yields an empty slice, not an
    /// error.
    pub fn get_recipient_certificates(&self, recipient: &AccountId) -> &[CertificateId] {
        self.recipient_index
            .get(recipient)
            .map_or(&[], Vec::as_slice)
    }

    fn require_admin(&self, caller: &AccountId) -> Result<(), RegistryError> {
        if *caller != self.admin {
            return Err(RegistryError::admin_only());
        }
        Ok(())
    }
}
