//! Image uploads
//!
//! Files are written under the upload directory and served back from
//! `/uploads` by the HTTP layer.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use fl_core::traits::{BlobStore, RepoResult};
use fl_core::DomainError;

use crate::dto::UploadResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Longest file extension kept from the client's file name
const MAX_EXTENSION_LEN: usize = 8;

/// Blob store on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(dir: impl AsRef<Path>, public_base_url: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, data: &[u8], file_name: &str) -> RepoResult<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;
        tokio::fs::write(self.dir.join(file_name), data)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        Ok(format!("{}/uploads/{file_name}", self.public_base_url))
    }
}

/// Upload service
pub struct UploadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UploadService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store an image and return its public URL
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload_image(
        &self,
        data: &[u8],
        content_type: Option<&str>,
        original_name: Option<&str>,
    ) -> ServiceResult<UploadResponse> {
        if data.is_empty() {
            return Err(ServiceError::validation("No se recibió ninguna imagen"));
        }
        let content_type = content_type.unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(ServiceError::validation("El archivo debe ser una imagen"));
        }

        let file_name = generated_file_name(original_name, content_type);
        let url = self.ctx.blob_store().upload(data, &file_name).await?;

        info!(file_name = %file_name, "Image uploaded");
        Ok(UploadResponse { url })
    }
}

/// `<unix millis>-<random><.ext>`. The extension comes from the original name,
/// else from the MIME subtype, and is dropped unless short and alphanumeric.
fn generated_file_name(original_name: Option<&str>, content_type: &str) -> String {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .or_else(|| content_type.strip_prefix("image/"))
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{suffix}{extension}", Utc::now().timestamp_millis())
}
