//! # Cert Subcommand
//!
//! Certificate lifecycle against the local snapshot: issue, revoke,
//! verify, show, and the per-recipient listing. Mutating commands print
//! the emitted event as JSON; `verify` exits 0 for a valid certificate
//! and 1 for a revoked one, so scripts can branch on the result.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use certreg_core::{AccountId, CertificateId, MetadataPointer};

use crate::store::{load_registry, save_registry};

/// Arguments for the `certreg cert` subcommand.
#[derive(Args, Debug)]
pub struct CertArgs {
    #[command(subcommand)]
    pub command: CertCommand,
}

/// Certificate subcommands.
#[derive(Subcommand, Debug)]
pub enum CertCommand {
    /// Issue a certificate (authorized issuers only).
    Issue {
        /// Identity the certificate is issued to.
        #[arg(long)]
        recipient: String,
        /// Content address of the metadata document.
        #[arg(long)]
        pointer: String,
        /// Acting identity; must be an authorized issuer.
        #[arg(long)]
        actor: String,
    },

    /// Revoke a certificate (issuer of record or admin).
    Revoke {
        /// Certificate id.
        id: u64,
        /// Why the certificate is being invalidated.
        #[arg(long, default_value = "")]
        reason: String,
        /// Acting identity.
        #[arg(long)]
        actor: String,
    },

    /// Check whether a certificate is currently valid.
    Verify {
        /// Certificate id.
        id: u64,
    },

    /// Print the full certificate record.
    Show {
        /// Certificate id.
        id: u64,
    },

    /// List certificate ids issued to a recipient, in issuance order.
    List {
        /// Recipient identity.
        #[arg(long)]
        recipient: String,
    },
}

/// Execute the cert subcommand.
pub fn run_cert(args: &CertArgs, state_path: &Path) -> Result<u8> {
    match &args.command {
        CertCommand::Issue {
            recipient,
            pointer,
            actor,
        } => {
            let actor = AccountId::new(actor.clone())?;
            let recipient = AccountId::new(recipient.clone())?;
            let pointer = MetadataPointer::new(pointer.clone())?;
            let mut registry = load_registry(state_path)?;
            let (id, event) =
                registry.issue_certificate(&actor, recipient, pointer, chrono::Utc::now())?;
            save_registry(state_path, &registry)?;
            tracing::info!(id = id.value(), "certificate issued");
            println!("{}", serde_json::to_string_pretty(&event)?);
            Ok(0)
        }

        CertCommand::Revoke { id, reason, actor } => {
            let actor = AccountId::new(actor.clone())?;
            let mut registry = load_registry(state_path)?;
            let event = registry.revoke_certificate(
                &actor,
                CertificateId::new(*id),
                reason.clone(),
                chrono::Utc::now(),
            )?;
            save_registry(state_path, &registry)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
            Ok(0)
        }

        CertCommand::Verify { id } => {
            let registry = load_registry(state_path)?;
            let (valid, cert) = registry.verify_certificate(CertificateId::new(*id))?;
            println!(
                "{}",
                serde_json::json!({
                    "id": cert.id.value(),
                    "valid": valid,
                    "revoke_reason": cert.revoke_reason(),
                })
            );
            Ok(if valid { 0 } else { 1 })
        }

        CertCommand::Show { id } => {
            let registry = load_registry(state_path)?;
            let cert = registry.get_certificate(CertificateId::new(*id))?;
            println!("{}", serde_json::to_string_pretty(cert)?);
            Ok(0)
        }

        CertCommand::List { recipient } => {
            let recipient = AccountId::new(recipient.clone())?;
            let registry = load_registry(state_path)?;
            let ids: Vec<u64> = registry
                .get_recipient_certificates(&recipient)
                .iter()
                .map(|id| id.value())
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "recipient": recipient.as_str(),
                    "certificate_ids": ids,
                })
            );
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{run_init, InitArgs};
    use crate::store::load_registry;

    fn init_snapshot(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("certreg.json");
        run_init(
            &InitArgs {
                admin: "admin".to_string(),
            },
            &path,
        )
        .unwrap();
        path
    }

    fn issue(path: &Path, actor: &str, recipient: &str, pointer: &str) -> Result<u8> {
        run_cert(
            &CertArgs {
                command: CertCommand::Issue {
                    recipient: recipient.to_string(),
                    pointer: pointer.to_string(),
                    actor: actor.to_string(),
                },
            },
            path,
        )
    }

    #[test]
    fn issue_verify_revoke_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_snapshot(&dir);

        assert_eq!(issue(&path, "admin", "alice", "QmA").unwrap(), 0);

        let verify = CertArgs {
            command: CertCommand::Verify { id: 1 },
        };
        assert_eq!(run_cert(&verify, &path).unwrap(), 0);

        let revoke = CertArgs {
            command: CertCommand::Revoke {
                id: 1,
                reason: "issued in error".to_string(),
                actor: "admin".to_string(),
            },
        };
        assert_eq!(run_cert(&revoke, &path).unwrap(), 0);

        // Verify now reports invalid via the exit code.
        assert_eq!(run_cert(&verify, &path).unwrap(), 1);

        let registry = load_registry(&path).unwrap();
        let cert = registry.get_certificate(CertificateId::new(1)).unwrap();
        assert!(cert.is_revoked());
        assert_eq!(cert.revoke_reason(), "issued in error");
    }

    #[test]
    fn unauthorized_issue_fails_without_touching_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_snapshot(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        assert!(issue(&path, "mallory", "alice", "QmA").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn empty_pointer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_snapshot(&dir);
        let err = issue(&path, "admin", "alice", "").unwrap_err();
        assert!(err.to_string().contains("metadata pointer cannot be empty"));
    }

    #[test]
    fn double_revocation_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_snapshot(&dir);
        issue(&path, "admin", "alice", "QmA").unwrap();

        let revoke = CertArgs {
            command: CertCommand::Revoke {
                id: 1,
                reason: String::new(),
                actor: "admin".to_string(),
            },
        };
        run_cert(&revoke, &path).unwrap();
        let err = run_cert(&revoke, &path).unwrap_err();
        assert!(err.to_string().contains("already revoked"));
    }

    #[test]
    fn list_preserves_issuance_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_snapshot(&dir);
        issue(&path, "admin", "alice", "QmA").unwrap();
        issue(&path, "admin", "bob", "QmB").unwrap();
        issue(&path, "admin", "alice", "QmC").unwrap();

        let registry = load_registry(&path).unwrap();
        let alice = AccountId::new("alice").unwrap();
        let ids: Vec<u64> = registry
            .get_recipient_certificates(&alice)
            .iter()
            .map(|id| id.value())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn unknown_certificate_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_snapshot(&dir);
        let verify = CertArgs {
            command: CertCommand::Verify { id: 42 },
        };
        let err = run_cert(&verify, &path).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
