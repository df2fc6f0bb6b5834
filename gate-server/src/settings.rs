use anyhow::{anyhow, bail, Context, Result};
use gate_blob::{BlobConfig, S3Config};
use gate_core::GateConfigSnapshot;

pub const ENV_PREFIX: &str = "MEDIAGATE__";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3030;
const DEFAULT_BUCKET: &str = "mediagate";
const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    S3(S3Settings),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    pub endpoint_url: Option<String>,
    pub credentials: Option<(String, String)>,
}

impl S3Settings {
    pub fn to_config(&self) -> S3Config {
        let mut config = S3Config::new(self.bucket.clone()).with_region(self.region.clone());
        if let Some(endpoint) = &self.endpoint_url {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some((key, secret)) = &self.credentials {
            config = config.with_credentials(key.clone(), secret.clone());
        }
        config
    }
}

/// Everything the server needs, resolved from config with defaults applied.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub service_version: String,
    pub max_upload_bytes: u64,
    pub link_scheme: String,
    pub link_host: Option<String>,
    pub storage: StorageBackend,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            max_upload_bytes: BlobConfig::default().max_blob_bytes,
            link_scheme: "https".to_string(),
            link_host: None,
            storage: StorageBackend::Memory,
        }
    }
}

impl ServerSettings {
    /// Read settings from a config snapshot.
    ///
    /// Missing keys take defaults; present but malformed values are errors.
    pub fn from_snapshot(cfg: &GateConfigSnapshot) -> Result<Self> {
        let defaults = Self::default();

        let port = match non_empty(cfg, "http.port") {
            Some(raw) => cfg
                .get_parsed::<u16>("http.port")
                .with_context(|| format!("http.port: invalid port {raw:?}"))?,
            None => defaults.port,
        };

        let max_upload_bytes = match non_empty(cfg, "upload.max_bytes") {
            Some(raw) => cfg
                .get_parsed::<u64>("upload.max_bytes")
                .with_context(|| format!("upload.max_bytes: invalid size {raw:?}"))?,
            None => defaults.max_upload_bytes,
        };
        if max_upload_bytes == 0 {
            bail!("upload.max_bytes must be greater than zero");
        }

        let link_scheme = non_empty(cfg, "link.scheme").unwrap_or(defaults.link_scheme);
        if link_scheme != "http" && link_scheme != "https" {
            bail!("link.scheme must be http or https, got {link_scheme:?}");
        }

        Ok(Self {
            host: non_empty(cfg, "http.host").unwrap_or(defaults.host),
            port,
            service_version: non_empty(cfg, "service.version").unwrap_or(defaults.service_version),
            max_upload_bytes,
            link_scheme,
            link_host: non_empty(cfg, "link.host"),
            storage: storage_backend(cfg)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn blob_config(&self) -> BlobConfig {
        BlobConfig::new().with_max_blob_bytes(self.max_upload_bytes)
    }
}

fn non_empty(cfg: &GateConfigSnapshot, key: &str) -> Option<String> {
    cfg.get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn storage_backend(cfg: &GateConfigSnapshot) -> Result<StorageBackend> {
    let backend = non_empty(cfg, "storage.backend").unwrap_or_else(|| "memory".to_string());

    match backend.to_ascii_lowercase().as_str() {
        "memory" => Ok(StorageBackend::Memory),
        "s3" => {
            let credentials = match (non_empty(cfg, "s3.access_key_id"), non_empty(cfg, "s3.secret_access_key")) {
                (Some(key), Some(secret)) => Some((key, secret)),
                (None, None) => None,
                _ => bail!("s3.access_key_id and s3.secret_access_key must be set together"),
            };

            Ok(StorageBackend::S3(S3Settings {
                bucket: non_empty(cfg, "s3.bucket").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                region: non_empty(cfg, "s3.region").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                endpoint_url: non_empty(cfg, "s3.endpoint_url"),
                credentials,
            }))
        }
        other => Err(anyhow!("storage.backend: unknown backend {other:?} (expected memory or s3)")),
    }
}
