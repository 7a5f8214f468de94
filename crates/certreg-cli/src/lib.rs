//! # certreg-cli — CLI for the Certificate Registry
//!
//! Provides the `certreg` command-line interface over a local JSON
//! snapshot of the registry. Each invocation loads the snapshot, applies
//! one operation through the same guarded entry points the HTTP API
//! uses, and saves the result.
//!
//! ## Subcommands
//!
//! - `certreg init` — Bootstrap a fresh registry snapshot.
//! - `certreg issuer` — Authorize, revoke, and query issuers.
//! - `certreg cert` — Issue, revoke, verify, show, and list certificates.
//! - `certreg serve` — Serve the HTTP API from the snapshot.
//!
//! ```bash
//! certreg init --admin registrar
//! certreg issuer authorize issuer-a --actor registrar
//! certreg cert issue --recipient alice --pointer QmPointer --actor issuer-a
//! certreg cert verify 1
//! ```

pub mod cert;
pub mod init;
pub mod issuer;
pub mod serve;
pub mod store;
