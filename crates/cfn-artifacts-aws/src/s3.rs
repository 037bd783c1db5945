use async_trait::async_trait;
use aws_sdk_s3::Client;
use cfn_artifacts_core::{ArtifactError, ArtifactRef, ArtifactStore, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Downloads artifacts with S3 `GetObject`
#[derive(Clone, Debug)]
pub struct S3ArtifactStore {
    client: Client,
}

impl S3ArtifactStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn download_to(&self, artifact: &ArtifactRef, path: &Path) -> Result<()> {
        let resp = self
            .client
            .get_object()
            .bucket(&artifact.bucket)
            .key(&artifact.key)
            .send()
            .await
            .map_err(|e| ArtifactError::transport("GetObject", e))?;

        debug!(
            %artifact,
            content_length = ?resp.content_length(),
            "streaming object to {}",
            path.display()
        );

        // File::create truncates, so a previous download is replaced
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| ArtifactError::io(path, e))?;

        let mut body = resp.body;
        let mut written = 0u64;
        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| ArtifactError::transport("GetObject", e))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| ArtifactError::io(path, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| ArtifactError::io(path, e))?;
        debug!(%artifact, bytes = written, "download complete");

        Ok(())
    }
}
