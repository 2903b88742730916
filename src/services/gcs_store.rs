//! Google Cloud Storage backed [`PhotoStore`].
//!
//! Object I/O goes through `object_store`'s GCS client. Making an object
//! public is not something `object_store` models, so that single call is sent
//! to the GCS JSON API with `reqwest`, reusing the same credential provider.

use crate::{
    config::AppConfig,
    services::photo_store::{PhotoStore, StoreError, StoreResult},
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{
    Attribute, Attributes, ObjectStore, PutOptions, PutPayload,
    gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder},
    path::Path,
};
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const JSON_API_BASE: &str = "https://storage.googleapis.com/storage/v1";

/// ACL entry granting anonymous read access.
#[derive(Debug, Serialize)]
struct AclEntry {
    entity: &'static str,
    role: &'static str,
}

const PUBLIC_READ: AclEntry = AclEntry {
    entity: "allUsers",
    role: "READER",
};

pub struct GcsPhotoStore {
    objects: Arc<GoogleCloudStorage>,
    http: reqwest::Client,
    bucket: String,
    project_id: Option<String>,
    api_base: Url,
}

impl GcsPhotoStore {
    /// Build a client for the configured bucket.
    ///
    /// Uses the key file when one is configured, otherwise falls back to
    /// application-default credentials picked up from the environment.
    pub fn new(cfg: &AppConfig) -> StoreResult<Self> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(&cfg.bucket);
        if let Some(key_file) = &cfg.key_file {
            builder = builder.with_service_account_path(key_file.to_string_lossy());
        }
        let objects = builder.build()?;

        let api_base = Url::parse(JSON_API_BASE)
            .map_err(|err| StoreError::Backend(format!("invalid JSON API base: {}", err)))?;

        debug!(
            bucket = %cfg.bucket,
            project = cfg.project_id.as_deref().unwrap_or("<default>"),
            "Created GCS photo store"
        );

        Ok(Self {
            objects: Arc::new(objects),
            http: reqwest::Client::new(),
            bucket: cfg.bucket.clone(),
            project_id: cfg.project_id.clone(),
            api_base,
        })
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

#[async_trait]
impl PhotoStore for GcsPhotoStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_objects(&self) -> StoreResult<Vec<String>> {
        let names = self
            .objects
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect::<Vec<_>>()
            .await?;
        debug!(bucket = %self.bucket, count = names.len(), "listed objects");
        Ok(names)
    }

    async fn write_object(
        &self,
        name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> StoreResult<String> {
        let path = object_path(name)?;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        self.objects
            .put_opts(&path, PutPayload::from(bytes), opts)
            .await?;
        Ok(path.to_string())
    }

    async fn make_public(&self, name: &str) -> StoreResult<()> {
        let url = acl_url(&self.api_base, &self.bucket, name)?;
        let credential = self.objects.credentials().get_credential().await?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&credential.bearer)
            .json(&PUBLIC_READ)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, name, body))
    }
}

/// Convert an uploaded filename into an object path, keeping it verbatim.
///
/// Empty names, empty segments, `.`/`..` segments and control characters
/// are rejected.
fn object_path(name: &str) -> StoreResult<Path> {
    let path =
        Path::parse(name).map_err(|_| StoreError::InvalidObjectName(name.to_string()))?;
    if path.as_ref().is_empty() {
        return Err(StoreError::InvalidObjectName(name.to_string()));
    }
    Ok(path)
}

/// `{base}/b/{bucket}/o/{object}/acl`, with the object name encoded as a
/// single path segment.
fn acl_url(base: &Url, bucket: &str, object: &str) -> StoreResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| StoreError::Backend(format!("cannot build ACL URL from {}", base)))?
        .extend(["b", bucket, "o", object, "acl"]);
    Ok(url)
}

fn classify_status(status: StatusCode, name: &str, body: String) -> StoreError {
    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(name.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StoreError::PermissionDenied(name.to_string())
        }
        other => StoreError::Backend(format!("ACL update returned {}: {}", other, body)),
    }
}
