//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for the registry. Each identifier is a
//! distinct type — you cannot pass a [`MetadataPointer`] where an
//! [`AccountId`] is expected, and a [`CertificateId`] is never confused
//! with a bare counter.
//!
//! ## Validation
//!
//! String-based identifiers ([`AccountId`], [`MetadataPointer`]) validate
//! at construction time. [`CertificateId`] is always valid by construction:
//! the registry is the only place that mints them, strictly increasing
//! from 1.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// An authenticated caller or recipient identity.
///
/// The hosting environment authenticates identities before the registry
/// ever sees them; the registry only cares that the identity is a
/// well-formed opaque token. Wallet addresses, DIDs, and service account
/// names are all acceptable.
///
/// # Validation
///
/// - Non-empty after trimming
/// - No interior whitespace
/// - At most 256 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccountId(String);

impl_validating_deserialize!(AccountId);

impl AccountId {
    /// Create an account identity from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] if the value is empty,
    /// contains whitespace, or exceeds 256 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, RegistryError> {
        let s = value.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::Validation(
                "account identity cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > 256 {
            return Err(RegistryError::Validation(format!(
                "account identity exceeds 256 characters ({})",
                trimmed.len()
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(RegistryError::Validation(format!(
                "account identity contains whitespace: {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the identity string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Content address of off-chain certificate metadata.
///
/// The registry treats the pointer as an untyped opaque string: it
/// validates non-emptiness and nothing else — not the format, not the
/// reachability. Resolution is the content-addressed store's problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MetadataPointer(String);

impl_validating_deserialize!(MetadataPointer);

impl MetadataPointer {
    /// Create a metadata pointer, rejecting empty values.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] with the message
    /// `"metadata pointer cannot be empty"` if the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, RegistryError> {
        let s = value.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::Validation(
                "metadata pointer cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the pointer string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MetadataPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MetadataPointer {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A certificate identifier: positive, unique, assigned by the registry
/// in strictly increasing order starting at 1. Never reused, even after
/// revocation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CertificateId(u64);

impl CertificateId {
    /// Wrap a raw id value. The registry is the sole authority on which
    /// ids actually exist; looking up a fabricated id simply yields
    /// [`RegistryError::NotFound`].
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Access the raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CertificateId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for CertificateId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}
