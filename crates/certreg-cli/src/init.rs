//! # Init Subcommand
//!
//! Bootstraps a fresh registry snapshot with a single admin identity.
//! Refuses to clobber an existing snapshot.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use certreg_core::{AccountId, CertificateRegistry};

use crate::store::save_registry;

/// Arguments for the `certreg init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Identity that becomes the registry admin. Immutable afterwards.
    #[arg(long)]
    pub admin: String,
}

/// Execute the init subcommand.
pub fn run_init(args: &InitArgs, state_path: &Path) -> Result<u8> {
    if state_path.exists() {
        bail!("snapshot already exists: {}", state_path.display());
    }
    let admin = AccountId::new(args.admin.clone())?;
    let registry = CertificateRegistry::new(admin.clone());
    save_registry(state_path, &registry)?;
    println!(
        "{}",
        serde_json::json!({
            "initialized": state_path.display().to_string(),
            "admin": admin.as_str(),
        })
    );
    Ok(0)
}
