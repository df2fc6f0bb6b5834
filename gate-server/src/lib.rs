//! gate-server: wires configuration, storage and the HTTP surface together.

pub mod settings;

use anyhow::Result;
use gate_axum::{gateway, GateApp, GateState, LinkConfig};
use gate_blob::{BlobStore, MediaAdapter, MemoryBlobStore, S3BlobStore};
use gate_core::GateConfig;

pub use settings::{ServerSettings, StorageBackend, ENV_PREFIX};

/// Build the gateway from config, connecting the configured storage backend.
pub async fn build(config: &GateConfig) -> Result<(GateApp, ServerSettings)> {
    let settings = ServerSettings::from_snapshot(&config.snapshot())?;

    let app = match &settings.storage {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; blobs are lost on restart");
            build_with_store(&settings, MemoryBlobStore::new())
        }
        StorageBackend::S3(s3) => {
            let store = S3BlobStore::connect(s3.to_config()).await;
            build_with_store(&settings, store)
        }
    };

    Ok((app, settings))
}

/// Build the gateway over an explicit store.
pub fn build_with_store<S: BlobStore + 'static>(settings: &ServerSettings, store: S) -> GateApp {
    let adapter = MediaAdapter::new(store, settings.blob_config());

    let mut links = LinkConfig::new(settings.link_scheme.clone());
    if let Some(host) = &settings.link_host {
        links = links.with_host(host.clone());
    }

    gateway(GateState::new(adapter).with_links(links), &settings.service_version)
}
