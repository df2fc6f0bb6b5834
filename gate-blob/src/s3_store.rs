use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream as AwsByteStream, Client};
use bytes::Bytes;

use crate::{BlobError, BlobResult, BlobStore, GetResult};

/// Connection settings for an S3-compatible bucket
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible servers (MinIO, RustFS, ...)
    pub endpoint_url: Option<String>,
    /// Static credentials; when absent the default AWS provider chain is used
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub force_path_style: bool,
}

impl S3Config {
    pub fn new<S: Into<String>>(bucket: S) -> Self {
        Self {
            bucket: bucket.into(),
            region: "us-east-1".to_string(),
            endpoint_url: None,
            access_key_id: None,
            secret_access_key: None,
            force_path_style: false,
        }
    }

    pub fn with_region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = region.into();
        self
    }

    /// Point at a custom endpoint. Path-style addressing is switched on, as
    /// most self-hosted servers require it.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint_url: S) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self.force_path_style = true;
        self
    }

    pub fn with_credentials<A: Into<String>, S: Into<String>>(mut self, access_key_id: A, secret_access_key: S) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }
}

/// Blob store backed by one S3 bucket; blob ids are object keys.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    pub async fn connect(config: S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(key), Some(secret)) = (config.access_key_id.clone(), config.secret_access_key.clone()) {
            loader = loader.credentials_provider(Credentials::new(key, secret, None, None, "mediagate"));
        }
        if let Some(endpoint) = config.endpoint_url.clone() {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let client = Client::from_conf(
            aws_sdk_s3::config::Builder::from(&shared)
                .force_path_style(config.force_path_style)
                .build(),
        );

        tracing::info!(bucket = %config.bucket, region = %config.region, "S3 blob store ready");

        Self {
            client,
            bucket: config.bucket,
        }
    }
}

/// Status S3 returns when `If-None-Match: *` finds an object at the key.
const PRECONDITION_FAILED: u16 = 412;

fn put_failure<E>(key: &str, status: Option<u16>, err: E) -> BlobError
where
    E: std::error::Error + Send + Sync + 'static,
{
    if status == Some(PRECONDITION_FAILED) {
        BlobError::AlreadyExists { key: key.to_string() }
    } else {
        BlobError::backend(err)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    /// Conditional write: an existing object at `key` is never replaced.
    async fn put(&self, key: &str, bytes: Bytes) -> BlobResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .if_none_match("*")
            .body(AwsByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| {
                let status = err.raw_response().map(|r| r.status().as_u16());
                put_failure(key, status, err)
            })?;
        Ok(())
    }

    async fn get(&self, key: &str) -> BlobResult<GetResult> {
        match self.client.get_object().bucket(&self.bucket).key(key).send().await {
            Ok(output) => {
                let body = output.body.collect().await.map_err(BlobError::backend)?;
                Ok(GetResult::Found(body.into_bytes()))
            }
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    Ok(GetResult::NotFound)
                } else {
                    Err(BlobError::backend(err))
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_switches_to_path_style() {
        let config = S3Config::new("media").with_endpoint("http://localhost:9000");
        assert!(config.force_path_style);
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn credentials_are_optional() {
        let config = S3Config::new("media");
        assert!(config.access_key_id.is_none());

        let config = config.with_credentials("id", "secret").with_region("eu-west-1");
        assert_eq!(config.access_key_id.as_deref(), Some("id"));
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn existing_object_is_reported_not_replaced() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "precondition failed");
        let mapped = put_failure("abc", Some(412), err);
        assert!(matches!(mapped, BlobError::AlreadyExists { ref key } if key == "abc"));
        assert!(mapped.is_storage_fault());
    }

    #[test]
    fn other_put_failures_are_backend_errors() {
        for status in [Some(403), Some(500), None] {
            let err = std::io::Error::new(std::io::ErrorKind::Other, "nope");
            assert!(matches!(put_failure("abc", status, err), BlobError::Backend { .. }));
        }
    }
}
