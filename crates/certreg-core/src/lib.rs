//! # certreg-core — Certificate Registry State Machine
//!
//! The authoritative, tamper-evident record of who issued which
//! credential to whom, whether it is still valid, and why it was
//! invalidated if not. Provides:
//!
//! - **Access control** — a single immutable admin and a dynamic set of
//!   authorized issuers gating every mutating operation.
//! - **Certificate ledger** ([`CertificateRegistry`]) — the append-only
//!   certificate store, per-recipient index, and the
//!   issuance/revocation/verification operations.
//! - **Events** ([`RegistryEvent`]) — one event per successful mutation,
//!   returned to the caller for the hosting environment to deliver.
//!
//! ## Execution Model
//!
//! The core is a pure, synchronous, deterministic library: no internal
//! threading, no blocking I/O, no suspension. The hosting environment
//! serializes calls into a single total order and supplies authenticated
//! caller identities and a monotonic timestamp. A call either completes
//! atomically or fails atomically with a [`RegistryError`], leaving state
//! untouched.

pub mod certificate;
pub mod error;
pub mod event;
pub mod identity;
pub mod registry;

// Re-export primary types.
pub use certificate::{Certificate, Revocation};
pub use error::RegistryError;
pub use event::RegistryEvent;
pub use identity::{AccountId, CertificateId, MetadataPointer};
pub use registry::CertificateRegistry;
