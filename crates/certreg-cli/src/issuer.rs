//! # Issuer Subcommand
//!
//! Issuer-set management against the local snapshot. Mutating commands
//! take the acting identity via `--actor` and print the emitted event as
//! JSON; `check` is a pure query.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use certreg_core::AccountId;

use crate::store::{load_registry, save_registry};

/// Arguments for the `certreg issuer` subcommand.
#[derive(Args, Debug)]
pub struct IssuerArgs {
    #[command(subcommand)]
    pub command: IssuerCommand,
}

/// Issuer subcommands.
#[derive(Subcommand, Debug)]
pub enum IssuerCommand {
    /// Add an identity to the issuer set (admin only).
    Authorize {
        /// Identity to authorize.
        target: String,
        /// Acting identity; must be the admin.
        #[arg(long)]
        actor: String,
    },

    /// Remove an identity from the issuer set (admin only; the admin
    /// itself cannot be removed).
    Revoke {
        /// Identity to revoke.
        target: String,
        /// Acting identity; must be the admin.
        #[arg(long)]
        actor: String,
    },

    /// Query issuer-set membership.
    Check {
        /// Identity to query.
        target: String,
    },
}

/// Execute the issuer subcommand.
pub fn run_issuer(args: &IssuerArgs, state_path: &Path) -> Result<u8> {
    match &args.command {
        IssuerCommand::Authorize { target, actor } => {
            let actor = AccountId::new(actor.clone())?;
            let target = AccountId::new(target.clone())?;
            let mut registry = load_registry(state_path)?;
            let event = registry.authorize_issuer(&actor, target, chrono::Utc::now())?;
            save_registry(state_path, &registry)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
            Ok(0)
        }

        IssuerCommand::Revoke { target, actor } => {
            let actor = AccountId::new(actor.clone())?;
            let target = AccountId::new(target.clone())?;
            let mut registry = load_registry(state_path)?;
            let event = registry.revoke_issuer(&actor, target, chrono::Utc::now())?;
            save_registry(state_path, &registry)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
            Ok(0)
        }

        IssuerCommand::Check { target } => {
            let target = AccountId::new(target.clone())?;
            let registry = load_registry(state_path)?;
            let authorized = registry.is_authorized_issuer(&target);
            println!(
                "{}",
                serde_json::json!({
                    "identity": target.as_str(),
                    "authorized": authorized,
                })
            );
            Ok(if authorized { 0 } else { 1 })
        }
    }
}
