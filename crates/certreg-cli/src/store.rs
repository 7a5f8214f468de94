//! # Registry Snapshot Store
//!
//! Loads and saves the registry as a JSON snapshot file. The CLI applies
//! one operation per invocation: load, mutate, save. Saves go through a
//! temp file plus rename so a crash mid-write cannot corrupt the
//! snapshot.

use std::path::Path;

use anyhow::{bail, Context, Result};

use certreg_core::CertificateRegistry;

/// Load a registry snapshot from `path`.
pub fn load_registry(path: &Path) -> Result<CertificateRegistry> {
    if !path.exists() {
        bail!(
            "no registry snapshot at {}; run `certreg init --admin <identity>` first",
            path.display()
        );
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("snapshot {} is not a valid registry", path.display()))
}

/// Save a registry snapshot to `path`.
pub fn save_registry(path: &Path, registry: &CertificateRegistry) -> Result<()> {
    let raw = serde_json::to_string_pretty(registry).context("failed to serialize registry")?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, raw)
        .with_context(|| format!("failed to write snapshot {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace snapshot {}", path.display()))?;
    Ok(())
}
