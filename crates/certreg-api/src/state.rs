//! # Application State
//!
//! One process-wide [`CertificateRegistry`] behind a `parking_lot`
//! RwLock — the lock is the hosting environment's serialization of calls
//! into a total order, which the core requires. The optional
//! [`IpfsClient`] is the content-addressed store collaborator; when it
//! is absent the metadata routes return 503 rather than fabricating
//! pointers.

use std::sync::Arc;

use parking_lot::RwLock;

use certreg_core::{AccountId, CertificateRegistry};

use crate::ipfs::IpfsClient;

/// Server configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind (`CERTREG_PORT`, default 8080).
    pub port: u16,
    /// Identity that becomes the registry admin (`CERTREG_ADMIN`).
    pub admin: AccountId,
    /// Base URL of the IPFS HTTP API (`CERTREG_IPFS_URL`), if any.
    pub ipfs_url: Option<String>,
}

impl AppConfig {
    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error string if `CERTREG_ADMIN` is missing or invalid,
    /// or if `CERTREG_PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, String> {
        let admin = std::env::var("CERTREG_ADMIN")
            .map_err(|_| "CERTREG_ADMIN must be set to the admin identity".to_string())?;
        let admin = AccountId::new(admin).map_err(|e| format!("CERTREG_ADMIN invalid: {e}"))?;

        let port = match std::env::var("CERTREG_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("CERTREG_PORT invalid: {raw}"))?,
            Err(_) => 8080,
        };

        let ipfs_url = std::env::var("CERTREG_IPFS_URL").ok();

        Ok(Self {
            port,
            admin,
            ipfs_url,
        })
    }
}

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The registry. Writers take the lock exclusively; at most one call
    /// mutates the state at a time.
    pub registry: Arc<RwLock<CertificateRegistry>>,
    /// Content-addressed store client. `None` when no store is
    /// configured.
    pub ipfs: Option<Arc<IpfsClient>>,
}

impl AppState {
    /// Fresh state with `admin` as the registry administrator and no
    /// metadata store.
    pub fn new(admin: AccountId) -> Self {
        Self {
            registry: Arc::new(RwLock::new(CertificateRegistry::new(admin))),
            ipfs: None,
        }
    }

    /// Wrap an existing registry, e.g. one loaded from a snapshot.
    pub fn with_registry(registry: CertificateRegistry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            ipfs: None,
        }
    }

    /// Build state from resolved configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let ipfs = config
            .ipfs_url
            .as_deref()
            .map(|url| Arc::new(IpfsClient::new(url)));
        Self {
            registry: Arc::new(RwLock::new(CertificateRegistry::new(config.admin.clone()))),
            ipfs,
        }
    }

    /// Attach a metadata store client.
    pub fn with_ipfs(mut self, client: IpfsClient) -> Self {
        self.ipfs = Some(Arc::new(client));
        self
    }
}
